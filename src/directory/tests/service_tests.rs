//! Service tests for user registration and team management.

use crate::directory::{
    domain::{DirectoryDomainError, Role, TeamId, UserId},
    services::{DirectoryError, RegisterUserRequest},
};
use crate::store::domain::MissingEntity;
use crate::task::{domain::Assignment, services::CreateTaskRequest};
use crate::test_support::{Practice, practice, task_details};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected_case_insensitively() -> eyre::Result<()> {
    let Practice { portal, .. } = practice().await;

    let result = portal
        .directory
        .register_user(RegisterUserRequest::new("Alicia", "ALICE@firm.test", Role::Employee))
        .await;

    let Err(DirectoryError::Validation(DirectoryDomainError::DuplicateEmail(email))) = &result
    else {
        bail!("expected duplicate email error, got {result:?}");
    };
    ensure!(email == "alice@firm.test");
    ensure!(portal.directory.list_users().await.len() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_employees_excludes_administrators() -> eyre::Result<()> {
    let Practice {
        portal, alice, bob, ..
    } = practice().await;

    let employees: Vec<UserId> = portal
        .directory
        .list_employees()
        .await
        .iter()
        .map(crate::directory::domain::User::id)
        .collect();

    ensure!(employees == vec![alice, bob]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_reports_unknown_team_and_user() -> eyre::Result<()> {
    let Practice {
        portal, team, alice, ..
    } = practice().await;
    let unknown_team = TeamId::new();
    let unknown_user = UserId::new();

    let missing_team = portal.directory.add_member(unknown_team, alice).await;
    let missing_user = portal.directory.add_member(team, unknown_user).await;

    ensure!(matches!(
        missing_team,
        Err(DirectoryError::NotFound(MissingEntity::Team(id))) if id == unknown_team
    ));
    ensure!(matches!(
        missing_user,
        Err(DirectoryError::NotFound(MissingEntity::User(id))) if id == unknown_user
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_appends_and_persists_the_user() -> eyre::Result<()> {
    let Practice {
        portal,
        team,
        alice,
        bob,
        admin,
        repository,
    } = practice().await;
    let saves = repository.save_count();

    let updated = portal.directory.add_member(team, admin).await?;

    ensure!(updated.members() == [alice, bob, admin].as_slice());
    ensure!(repository.save_count() == saves + 1);
    ensure!(portal.directory.get_team(team).await == Some(updated));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_an_existing_member_is_a_validation_error() -> eyre::Result<()> {
    let Practice {
        portal, team, alice, ..
    } = practice().await;

    let result = portal.directory.add_member(team, alice).await;

    ensure!(result.as_ref().is_err_and(DirectoryError::is_validation));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_a_non_member_is_a_no_op() -> eyre::Result<()> {
    let Practice {
        portal,
        team,
        admin,
        repository,
        ..
    } = practice().await;
    let saves = repository.save_count();

    let updated = portal.directory.remove_member(team, admin).await?;

    ensure!(updated.members().len() == 2);
    ensure!(repository.save_count() == saves, "no-op must not persist");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_team_keeps_resolved_assignees() -> eyre::Result<()> {
    let Practice {
        portal,
        team,
        admin,
        alice,
        bob,
        ..
    } = practice().await;
    let details = task_details("Team Task Inc");
    let task = portal
        .tasks
        .create_task(
            CreateTaskRequest::new(details, Assignment::Teams(vec![team])),
            admin,
        )
        .await?;

    portal.directory.delete_team(team).await?;

    let reloaded = portal.tasks.get_task(task.id()).await;
    ensure!(reloaded.as_ref().is_some_and(|task| task.assigned_teams().is_empty()));
    ensure!(reloaded.is_some_and(|task| task.assigned_to() == [alice, bob]));
    ensure!(portal.directory.get_team(team).await.is_none());
    ensure!(
        portal
            .directory
            .delete_team(team)
            .await
            .is_err_and(|err| err.is_not_found())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_users_are_stored_normalised() -> eyre::Result<()> {
    let Practice { portal, .. } = practice().await;

    let created = portal
        .directory
        .register_user(
            RegisterUserRequest::new("  Ravi ", "Ravi@Firm.Test", Role::Employee).with_team("Tax"),
        )
        .await?;
    let stored = portal.directory.get_user(created.id()).await;

    ensure!(stored.as_ref() == Some(&created));
    ensure!(created.name() == "Ravi");
    ensure!(created.email().as_str() == "ravi@firm.test");
    ensure!(portal.directory.get_user(UserId::new()).await.is_none());
    Ok(())
}
