//! Post storage and radius search.

use wire::{Post, SearchQuery};

use crate::state::AppState;

pub async fn create_post(state: &AppState, post: Post) {
    state.posts.write().await.push(post);
}

/// Posts within `query.range_km()` of the query point, newest first.
pub async fn search(state: &AppState, query: &SearchQuery) -> Vec<Post> {
    let center = query.center();
    let range_km = query.range_km();

    let posts = state.posts.read().await;
    posts
        .iter()
        .rev()
        .filter(|p| center.distance_km(&p.location) <= range_km)
        .cloned()
        .collect()
}
