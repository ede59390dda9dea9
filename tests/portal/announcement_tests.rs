//! Announcement board integration tests.

use super::helpers::in_memory_office;
use eyre::ensure;
use rstest::rstest;
use taskdesk::announcement::domain::{AnnouncementDomainError, AnnouncementId};
use taskdesk::announcement::services::AnnouncementError;
use taskdesk::store::domain::MissingEntity;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn announcements_are_listed_newest_first() -> eyre::Result<()> {
    let office = in_memory_office().await?;
    let board = &office.portal.announcements;

    let holiday = board
        .create("Upcoming Holiday", "The office is closed on Friday.")
        .await?;
    let coffee = board
        .create("New Coffee Machine!", "Please keep the break room clean.")
        .await?;

    let titles: Vec<String> = board
        .list()
        .await
        .iter()
        .map(|announcement| announcement.title().to_owned())
        .collect();
    ensure!(titles == vec![coffee.title().to_owned(), holiday.title().to_owned()]);
    ensure!(coffee.created_at() > holiday.created_at());
    Ok(())
}

#[rstest]
#[case::blank_title("  ", "Body", AnnouncementDomainError::EmptyTitle)]
#[case::blank_content("Title", "", AnnouncementDomainError::EmptyContent)]
#[tokio::test(flavor = "multi_thread")]
async fn blank_announcements_are_rejected(
    #[case] title: &str,
    #[case] content: &str,
    #[case] expected: AnnouncementDomainError,
) -> eyre::Result<()> {
    let office = in_memory_office().await?;

    let result = office.portal.announcements.create(title, content).await;

    ensure!(matches!(result, Err(AnnouncementError::Validation(err)) if err == expected));
    ensure!(office.portal.announcements.list().await.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_removes_the_announcement_once() -> eyre::Result<()> {
    let office = in_memory_office().await?;
    let board = &office.portal.announcements;
    let posted = board.create("Audit season", "Timesheets due daily.").await?;

    board.delete(posted.id()).await?;
    let again = board.delete(posted.id()).await;
    let unknown_id = AnnouncementId::new();
    let unknown = board.delete(unknown_id).await;

    ensure!(board.list().await.is_empty());
    ensure!(again.is_err_and(|err| err.is_not_found()));
    ensure!(matches!(
        unknown,
        Err(AnnouncementError::NotFound(MissingEntity::Announcement(id))) if id == unknown_id
    ));
    Ok(())
}
