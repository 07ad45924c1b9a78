use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frontmatter::{self, FrontMatter};
use super::slug::slugify;
use crate::error::{Error, Result};

pub const POST_EXTENSION: &str = "md";

/// Header fields plus slug; what the admin list view shows.
#[derive(Debug, Clone, Serialize)]
pub struct PostMetadata {
    pub slug: String,
    #[serde(flatten)]
    pub front: FrontMatter,
}

/// A complete post: header plus body.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub slug: String,
    #[serde(flatten)]
    pub front: FrontMatter,
    pub content: String,
}

/// Payload for creating a post. `published` defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub first_level_category: String,
    pub second_level_category: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub draft: Option<bool>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(rename = "sourceLink", default)]
    pub source_link: Option<String>,
    #[serde(rename = "licenseName", default)]
    pub license_name: Option<String>,
    #[serde(rename = "licenseUrl", default)]
    pub license_url: Option<String>,
}

/// Partial update. Absent fields keep their stored value; present fields
/// overwrite, empty values included. The slug never changes, even when the
/// title does.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<NaiveDate>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub first_level_category: Option<String>,
    pub second_level_category: Option<String>,
    pub author: Option<String>,
    pub draft: Option<bool>,
    pub cover: Option<String>,
    #[serde(rename = "sourceLink")]
    pub source_link: Option<String>,
    #[serde(rename = "licenseName")]
    pub license_name: Option<String>,
    #[serde(rename = "licenseUrl")]
    pub license_url: Option<String>,
}

impl PostPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.published.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.first_level_category.is_none()
            && self.second_level_category.is_none()
            && self.author.is_none()
            && self.draft.is_none()
            && self.cover.is_none()
            && self.source_link.is_none()
            && self.license_name.is_none()
            && self.license_url.is_none()
    }
}

/// The slug-keyed document store over a single content directory.
pub struct PostRepository {
    content_dir: PathBuf,
}

impl PostRepository {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.content_dir.join(format!("{slug}.{POST_EXTENSION}"))
    }

    /// Lists the headers of every post, newest `published` first.
    ///
    /// A file that cannot be read or whose header does not parse is skipped
    /// with a warning; one bad file never takes down the whole listing.
    pub fn list_metadata(&self) -> Result<Vec<PostMetadata>> {
        let mut posts = Vec::new();

        if !self.content_dir.exists() {
            return Ok(posts);
        }

        for entry in fs::read_dir(&self.content_dir)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    tracing::warn!("skipping unreadable directory entry: {e}");
                    continue;
                }
            };

            if path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let document = match fs::read_to_string(&path) {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("skipping unreadable post {}: {e}", path.display());
                    continue;
                }
            };

            match frontmatter::parse_header(&document) {
                Ok(front) => posts.push(PostMetadata {
                    slug: slug.to_string(),
                    front,
                }),
                Err(e) => {
                    tracing::warn!("skipping post {} with a bad header: {e}", path.display());
                }
            }
        }

        posts.sort_by(|a, b| b.front.published.cmp(&a.front.published));

        Ok(posts)
    }

    /// Loads one post by exact slug. `Ok(None)` when no file exists.
    pub fn get(&self, slug: &str) -> Result<Option<Post>> {
        let path = self.post_path(slug);
        if !path.exists() {
            return Ok(None);
        }

        let document = fs::read_to_string(&path)?;
        let (front, content) = frontmatter::parse(&document)?;

        Ok(Some(Post {
            slug: slug.to_string(),
            front,
            content,
        }))
    }

    /// Creates a new post and returns its slug.
    ///
    /// The slug is fixed here, derived from the title, and a collision with
    /// an existing post is rejected rather than silently overwriting it.
    pub fn create(&self, new: NewPost) -> Result<String> {
        let title = new.title.trim();
        let content = new.content.trim();

        if title.is_empty() {
            return Err(Error::Validation("title cannot be empty".into()));
        }
        if content.is_empty() {
            return Err(Error::Validation("content cannot be empty".into()));
        }

        let slug = slugify(title);
        let path = self.post_path(&slug);
        if path.exists() {
            return Err(Error::AlreadyExists);
        }

        let front = FrontMatter {
            title: title.to_string(),
            published: new.published.unwrap_or_else(frontmatter::today),
            description: new.description,
            tags: new.tags,
            first_level_category: new.first_level_category,
            second_level_category: new.second_level_category,
            author: new.author,
            draft: new.draft,
            cover: new.cover,
            source_link: new.source_link,
            license_name: new.license_name,
            license_url: new.license_url,
            extra: Default::default(),
        };

        fs::create_dir_all(&self.content_dir)?;
        fs::write(&path, frontmatter::serialize(&front, content)?)?;

        tracing::info!("created post {}", path.display());
        Ok(slug)
    }

    /// Merges a partial update over the stored post and rewrites its file.
    pub fn update(&self, slug: &str, patch: PostPatch) -> Result<()> {
        let Some(existing) = self.get(slug)? else {
            return Err(Error::NotFound);
        };

        let mut front = existing.front;
        let mut content = existing.content;

        if let Some(title) = patch.title {
            front.title = title;
        }
        if let Some(new_content) = patch.content {
            content = new_content.trim().to_string();
        }
        if let Some(published) = patch.published {
            front.published = published;
        }
        if let Some(description) = patch.description {
            front.description = Some(description);
        }
        if let Some(tags) = patch.tags {
            front.tags = Some(tags);
        }
        if let Some(first) = patch.first_level_category {
            front.first_level_category = first;
        }
        if let Some(second) = patch.second_level_category {
            front.second_level_category = second;
        }
        if let Some(author) = patch.author {
            front.author = Some(author);
        }
        if let Some(draft) = patch.draft {
            front.draft = Some(draft);
        }
        if let Some(cover) = patch.cover {
            front.cover = Some(cover);
        }
        if let Some(source_link) = patch.source_link {
            front.source_link = Some(source_link);
        }
        if let Some(license_name) = patch.license_name {
            front.license_name = Some(license_name);
        }
        if let Some(license_url) = patch.license_url {
            front.license_url = Some(license_url);
        }

        fs::write(
            self.post_path(slug),
            frontmatter::serialize(&front, &content)?,
        )?;

        tracing::info!("updated post {}", self.post_path(slug).display());
        Ok(())
    }

    /// Removes a post's file. Irreversible.
    pub fn delete(&self, slug: &str) -> Result<()> {
        let path = self.post_path(slug);
        if !path.exists() {
            return Err(Error::NotFound);
        }

        fs::remove_file(&path)?;

        tracing::info!("deleted post {}", path.display());
        Ok(())
    }
}
