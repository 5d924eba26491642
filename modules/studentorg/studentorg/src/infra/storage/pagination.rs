use sea_orm::{DatabaseConnection, DbErr, PaginatorTrait, SelectorTrait};
use studentorg_sdk::{PAGE_SIZE, Page, PageInfo};

use crate::domain::query::PageRequest;

/// Count the matching rows, clamp the requested page into range and fetch it.
pub async fn fetch_page<'db, Q>(
    conn: &'db DatabaseConnection,
    query: Q,
    request: PageRequest,
) -> Result<Page<<Q::Selector as SelectorTrait>::Item>, DbErr>
where
    Q: PaginatorTrait<'db, DatabaseConnection>,
{
    let paginator = query.paginate(conn, PAGE_SIZE);
    let totals = paginator.num_items_and_pages().await?;
    let number = request.resolve(totals.number_of_pages);
    let items = paginator.fetch_page(number - 1).await?;
    Ok(Page::new(items, PageInfo::new(number, totals.number_of_items)))
}
