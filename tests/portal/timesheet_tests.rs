//! Time logging integration tests.

use super::helpers::in_memory_office;
use chrono::NaiveDate;
use eyre::{OptionExt, ensure};
use rstest::rstest;
use taskdesk::directory::domain::UserId;
use taskdesk::store::domain::MissingEntity;
use taskdesk::task::domain::TaskId;
use taskdesk::timesheet::domain::TimesheetDomainError;
use taskdesk::timesheet::services::{TimeEntryFilter, TimesheetError};

fn march(day: u32) -> eyre::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 3, day).ok_or_eyre("invalid March date")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entries_are_listed_newest_date_first() -> eyre::Result<()> {
    let office = in_memory_office().await?;
    let timesheets = &office.portal.timesheets;

    timesheets
        .log(office.employee, office.task, march(3)?, 120, "Vouching")
        .await?;
    timesheets
        .log(office.employee, office.task, march(5)?, 45, "Client call")
        .await?;
    timesheets
        .log(office.admin, office.task, march(4)?, 30, "Review")
        .await?;

    let all: Vec<NaiveDate> = timesheets
        .entries(TimeEntryFilter::new())
        .await
        .iter()
        .map(|entry| entry.date())
        .collect();
    let mine = timesheets
        .entries(TimeEntryFilter::new().with_user(office.employee))
        .await;

    ensure!(all == vec![march(5)?, march(4)?, march(3)?]);
    ensure!(mine.len() == 2);
    ensure!(mine.iter().all(|entry| entry.user_id() == office.employee));
    Ok(())
}

#[rstest]
#[case::zero_minutes(0, "Vouching", TimesheetDomainError::InvalidDuration(0))]
#[case::more_than_a_day(1441, "Vouching", TimesheetDomainError::InvalidDuration(1441))]
#[case::blank_description(60, "   ", TimesheetDomainError::EmptyDescription)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_entries_are_rejected(
    #[case] minutes: u32,
    #[case] description: &str,
    #[case] expected: TimesheetDomainError,
) -> eyre::Result<()> {
    let office = in_memory_office().await?;

    let result = office
        .portal
        .timesheets
        .log(office.employee, office.task, march(3)?, minutes, description)
        .await;

    ensure!(matches!(result, Err(TimesheetError::Validation(err)) if err == expected));
    ensure!(office.portal.timesheets.entries(TimeEntryFilter::new()).await.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn entries_must_reference_known_records() -> eyre::Result<()> {
    let office = in_memory_office().await?;
    let timesheets = &office.portal.timesheets;
    let (stranger, missing_task) = (UserId::new(), TaskId::new());

    let by_stranger = timesheets
        .log(stranger, office.task, march(3)?, 60, "Vouching")
        .await;
    let on_missing_task = timesheets
        .log(office.employee, missing_task, march(3)?, 60, "Vouching")
        .await;

    ensure!(matches!(
        by_stranger,
        Err(TimesheetError::NotFound(MissingEntity::User(id))) if id == stranger
    ));
    ensure!(matches!(
        on_missing_task,
        Err(TimesheetError::NotFound(MissingEntity::Task(id))) if id == missing_task
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn week_runs_sunday_to_saturday() -> eyre::Result<()> {
    let office = in_memory_office().await?;
    let timesheets = &office.portal.timesheets;
    for (day, minutes) in [(1, 15), (2, 60), (5, 90), (5, 30), (8, 45), (9, 120)] {
        timesheets
            .log(office.employee, office.task, march(day)?, minutes, "Fieldwork")
            .await?;
    }
    timesheets
        .log(office.admin, office.task, march(5)?, 240, "Review")
        .await?;

    let week = timesheets.week_of(office.employee, march(5)?).await?;

    ensure!(week.week_start == march(2)?);
    ensure!(week.week_end == march(8)?);
    let dates: Vec<NaiveDate> = week.entries.iter().map(|entry| entry.date()).collect();
    ensure!(dates == vec![march(2)?, march(5)?, march(5)?, march(8)?]);
    ensure!(week.total_minutes() == 225);
    ensure!(week.minutes_on(march(5)?) == 120);
    ensure!(week.minutes_on(march(9)?) == 0);
    Ok(())
}

#[rstest]
#[case::whole_log(false, None, None, vec![5, 4, 3, 1])]
#[case::from_only(false, Some(4), None, vec![5, 4])]
#[case::to_only(false, None, Some(3), vec![3, 1])]
#[case::closed_range(false, Some(3), Some(4), vec![4, 3])]
#[case::user_and_range(true, Some(2), Some(5), vec![5, 3])]
#[case::inverted_range(false, Some(5), Some(3), vec![])]
#[tokio::test(flavor = "multi_thread")]
async fn entries_honour_user_and_date_bounds(
    #[case] employee_only: bool,
    #[case] from: Option<u32>,
    #[case] to: Option<u32>,
    #[case] expected_days: Vec<u32>,
) -> eyre::Result<()> {
    let office = in_memory_office().await?;
    let timesheets = &office.portal.timesheets;
    for (user, day) in [
        (office.employee, 1),
        (office.employee, 3),
        (office.admin, 4),
        (office.employee, 5),
    ] {
        timesheets
            .log(user, office.task, march(day)?, 30, "Fieldwork")
            .await?;
    }
    let mut filter = TimeEntryFilter::new();
    if employee_only {
        filter = filter.with_user(office.employee);
    }
    if let Some(day) = from {
        filter = filter.with_from(march(day)?);
    }
    if let Some(day) = to {
        filter = filter.with_to(march(day)?);
    }

    let dates: Vec<NaiveDate> = timesheets
        .entries(filter)
        .await
        .iter()
        .map(|entry| entry.date())
        .collect();

    let expected = expected_days
        .into_iter()
        .map(march)
        .collect::<eyre::Result<Vec<_>>>()?;
    ensure!(dates == expected, "got {dates:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn week_at_the_calendar_floor_is_rejected() -> eyre::Result<()> {
    let office = in_memory_office().await?;

    let result = office
        .portal
        .timesheets
        .week_of(office.employee, NaiveDate::MIN)
        .await;

    ensure!(matches!(
        result,
        Err(TimesheetError::Validation(TimesheetDomainError::WeekOutOfRange(date)))
            if date == NaiveDate::MIN
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_removes_its_time_entries() -> eyre::Result<()> {
    let office = in_memory_office().await?;
    office
        .portal
        .timesheets
        .log(office.employee, office.task, march(3)?, 60, "Vouching")
        .await?;

    office.portal.tasks.delete_task(office.task, office.admin).await?;

    ensure!(office.portal.timesheets.entries(TimeEntryFilter::new()).await.is_empty());
    Ok(())
}
