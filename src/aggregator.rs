use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::posts::{Post, PostQuery, SortDirection, SortField};

/// Keep the first post seen for each id, preserving input order.
pub fn dedupe(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::with_capacity(posts.len());
    posts.into_iter().filter(|p| seen.insert(p.id)).collect()
}

/// Sort posts in place.
///
/// Missing field defaults to `id`, missing direction to ascending. Equal keys
/// fall back to `id` ascending in either direction.
pub fn sort_posts(posts: &mut [Post], sort_by: Option<SortField>, direction: Option<SortDirection>) {
    let field = sort_by.unwrap_or_default();
    let direction = direction.unwrap_or_default();

    posts.sort_by(|a, b| {
        let ord = match direction {
            SortDirection::Asc => field.compare(a, b),
            SortDirection::Desc => field.compare(b, a),
        };
        ord.then_with(|| a.id.cmp(&b.id))
    });
}

/// Validate the raw parameters, fetch every tag, then dedupe and sort.
///
/// Validation failures return before any upstream request is made.
pub async fn aggregate(
    fetcher: &Fetcher,
    raw_tags: Option<&str>,
    raw_sort_by: Option<&str>,
    raw_direction: Option<&str>,
) -> Result<Vec<Post>> {
    let query = PostQuery::validate(raw_tags, raw_sort_by, raw_direction)?;
    debug!(?query, "Validated posts query");

    let fetched = fetcher.fetch_all(&query.tags).await?;
    let fetched_count = fetched.len();

    let mut posts = dedupe(fetched);
    sort_posts(&mut posts, query.sort_by, query.direction);

    let (field, direction) = query.effective_sort();
    info!(
        "Aggregated {} unique posts ({} fetched) sorted by {:?} {:?}",
        posts.len(),
        fetched_count,
        field,
        direction
    );
    Ok(posts)
}
