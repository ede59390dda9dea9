//! Given steps for task approval BDD scenarios.

use super::world::{ApprovalWorld, Staff, run_async};
use chrono::{TimeDelta, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdesk::directory::domain::Role;
use taskdesk::directory::services::RegisterUserRequest;
use taskdesk::task::domain::{Assignment, TaskDetails};
use taskdesk::task::services::CreateTaskRequest;

#[given("an administrator and a team of two employees")]
fn administrator_and_team(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    world.open_portal()?;
    let directory = &world.portal()?.directory;

    let admin = run_async(directory.register_user(RegisterUserRequest::new(
        "Admin User",
        "admin@firm.test",
        Role::Admin,
    )))
    .wrap_err("register administrator")?
    .id();
    let mut employees = Vec::new();
    for (name, email) in [("Sravan", "sravan@firm.test"), ("Sai", "sai@firm.test")] {
        let user = run_async(directory.register_user(
            RegisterUserRequest::new(name, email, Role::Employee).with_team("Audit Team"),
        ))
        .wrap_err_with(|| format!("register {name}"))?;
        employees.push(user.id());
    }
    let team = run_async(directory.create_team("Audit Superstars"))
        .wrap_err("create team")?
        .id();
    for &member in &employees {
        run_async(directory.add_member(team, member)).wrap_err("add team member")?;
    }

    world.staff = Some(Staff {
        admin,
        employees,
        team,
    });
    Ok(())
}

#[given("a task assigned to the team")]
fn task_for_team(world: &mut ApprovalWorld) -> Result<(), eyre::Report> {
    tasks_for_team(world, 1)
}

#[given("{count:usize} tasks assigned to the team")]
fn tasks_for_team(world: &mut ApprovalWorld, count: usize) -> Result<(), eyre::Report> {
    let staff = world.staff()?;
    let (admin, team) = (staff.admin, staff.team);
    let tasks = &world.portal()?.tasks;
    let mut created = Vec::with_capacity(count);
    for index in 1..=count {
        let inward = Utc::now();
        let due = inward.date_naive() + TimeDelta::days(14);
        let details = TaskDetails::new(
            format!("Client {index}"),
            inward,
            due,
            due - TimeDelta::days(1),
        );
        let request = CreateTaskRequest::new(details, Assignment::Teams(vec![team]));
        let task = run_async(tasks.create_task(request, admin)).wrap_err("create task")?;
        created.push(task.id());
    }
    world.tasks.extend(created);
    Ok(())
}
