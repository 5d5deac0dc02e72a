//! Content API data model.

use serde::Deserialize;

/// One post as returned by the content API with
/// `fields=title,url,excerpt,feature_image,published_at`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    /// Post title.
    pub title: String,
    /// Absolute URL of the post page.
    pub url: String,
    /// Custom or generated excerpt.
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Hero image URL.
    #[serde(default)]
    pub feature_image: Option<String>,
    /// ISO-8601 publish timestamp.
    #[serde(default)]
    pub published_at: Option<String>,
}

/// `GET /ghost/api/content/posts/` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostsResponse {
    /// Matching posts, newest first.
    #[serde(default)]
    pub posts: Vec<Post>,
}

// =============== Mock 数据 ===============

/// Sample posts served by the `mock` build, newest first.
#[cfg(feature = "mock")]
pub fn get_mock_posts() -> Vec<Post> {
    let samples = [
        (
            "Reading Romans Slowly",
            "reading-romans-slowly",
            "A chapter-by-chapter walk through Paul's letter, with attention to the argument rather than proof texts.",
            true,
            "2024-05-02T09:00:00.000Z",
        ),
        (
            "Why the Reformers Read Augustine",
            "reformers-read-augustine",
            "Luther and Calvin quote Augustine on nearly every page. What were they looking for?",
            false,
            "2024-04-18T09:00:00.000Z",
        ),
        (
            "Sola Scriptura Is Not Solo Scriptura",
            "sola-not-solo",
            "",
            true,
            "2024-03-30T09:00:00.000Z",
        ),
        (
            "Ghost Themes and the Quiet Web",
            "ghost-themes-quiet-web",
            "Notes on building a reading-first theme: typography, restraint, and a search box that stays out of the way.",
            false,
            "2024-03-01T09:00:00.000Z",
        ),
    ];

    samples
        .into_iter()
        .map(|(title, slug, excerpt, has_image, published_at)| Post {
            title: title.to_string(),
            url: format!("/{slug}/"),
            excerpt: (!excerpt.is_empty()).then(|| excerpt.to_string()),
            feature_image: has_image.then(|| format!("/content/images/{slug}.jpg")),
            published_at: Some(published_at.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_deserialize_as_none() {
        let body = r#"{"posts":[{"title":"Hello","url":"https://blog.example/hello/","excerpt":null}]}"#;
        let response: PostsResponse = serde_json::from_str(body).expect("valid body");
        assert_eq!(response.posts.len(), 1);
        let post = &response.posts[0];
        assert_eq!(post.title, "Hello");
        assert!(post.excerpt.is_none());
        assert!(post.feature_image.is_none());
        assert!(post.published_at.is_none());
    }

    #[test]
    fn missing_posts_key_is_an_empty_list() {
        let response: PostsResponse = serde_json::from_str("{}").expect("valid body");
        assert!(response.posts.is_empty());
    }
}
