use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Presentation kind of a slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Markdown or plain text body.
    #[default]
    Text,
    /// Body accompanies an image (`image_ref`).
    Image,
    /// Body accompanies a video (`video_ref`).
    Video,
}

impl SlideKind {
    /// Parse a header `type` value. Unknown or empty values fall back to `Text`.
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Text,
        }
    }

    /// Lowercase name as written in headers and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for SlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value inside a keyed slide body: either a line of text or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentField {
    /// A single line.
    Text(String),
    /// Bullet points.
    List(Vec<String>),
}

/// Markdown body of a slide document.
///
/// Only a lone `markdown` key matches; objects with other keys are read as
/// [`SlideContent::Map`] so no section is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownBody {
    /// Trimmed markdown source.
    pub markdown: String,
}

/// Body of a slide, in whichever shape its source provided.
///
/// Serialized untagged, so the JSON forms `"text"`, `["a", "b"]`,
/// `{"key": "value"}` and `{"markdown": "..."}` all read back into the
/// matching variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideContent {
    /// Plain text.
    Text(String),
    /// Bullet points.
    List(Vec<String>),
    /// Markdown body from a slide document.
    Markdown(MarkdownBody),
    /// Named sections.
    Map(BTreeMap<String, ContentField>),
}

impl SlideContent {
    /// Wrap markdown source as a slide body.
    pub fn markdown(source: impl Into<String>) -> Self {
        Self::Markdown(MarkdownBody {
            markdown: source.into(),
        })
    }

    /// The markdown body, if this slide came from a front-matter document.
    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            Self::Markdown(body) => Some(&body.markdown),
            _ => None,
        }
    }
}

/// Smallest content unit, shown one at a time in the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Unique within its topic.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Slide body.
    pub content: SlideContent,
    /// Serialized as `type`.
    #[serde(rename = "type", default)]
    pub kind: SlideKind,
    /// Image shown with the slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Video shown with the slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_ref: Option<String>,
}

/// A named section of a course. Slide order is presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique within its course.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short summary shown in topic lists.
    #[serde(default)]
    pub description: String,
    /// Display string such as `10 min`.
    #[serde(default)]
    pub duration: String,
    /// Slides in presentation order.
    #[serde(default)]
    pub slides: Vec<Slide>,
    /// Progress flag owned by the UI layer. Always constructed as `false`.
    #[serde(default)]
    pub completed: bool,
}

impl Topic {
    /// Build a topic from its metadata descriptor and loaded slides.
    pub fn from_meta(meta: &TopicMeta, slides: Vec<Slide>) -> Self {
        Self {
            id: meta.id.clone(),
            title: meta.title.clone(),
            description: meta.description.clone(),
            duration: meta.duration.clone(),
            slides,
            completed: false,
        }
    }
}

/// Top-level learning unit. Topic order is presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Registry key.
    pub id: String,
    /// Topics in presentation order.
    pub topics: Vec<Topic>,
}

impl Course {
    /// Position of a topic within the course.
    pub fn topic_index(&self, topic_id: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.id == topic_id)
    }

    /// Look up a topic by id.
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// The topic following `topic_id`, if any.
    pub fn next_topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topic_index(topic_id)
            .and_then(|idx| self.topics.get(idx + 1))
    }

    /// Total slides across all topics.
    pub fn slide_count(&self) -> usize {
        self.topics.iter().map(|t| t.slides.len()).sum()
    }
}

/// How the slides of a topic are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideStrategy {
    /// Numbered files from a filename pattern and a known slide count.
    #[default]
    Pattern,
    /// Every content file in the topic directory, in sorted filename order.
    Directory,
}

/// Topic descriptor inside a course metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMeta {
    /// Topic id; also the topic directory name.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub description: String,
    /// Display string such as `10 min`.
    #[serde(default)]
    pub duration: String,
    /// Number of numbered slide files for the `pattern` strategy.
    #[serde(default)]
    pub slide_count: usize,
    /// Filename pattern override; `{n}` is replaced with the 1-based index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_pattern: Option<String>,
    /// How the topic's slides are located.
    #[serde(default)]
    pub strategy: SlideStrategy,
}

impl TopicMeta {
    /// This topic's filename pattern, or `default_pattern` when it has none.
    pub fn pattern_or<'a>(&'a self, default_pattern: &'a str) -> &'a str {
        self.slide_pattern.as_deref().unwrap_or(default_pattern)
    }
}

/// Course metadata document (`course.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMeta {
    /// Course id as written in the document.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub description: String,
    /// Free-form level such as `beginner`.
    #[serde(default)]
    pub difficulty: String,
    /// Display string such as `1 hour`.
    #[serde(default)]
    pub estimated_duration: String,
    /// Topics in presentation order.
    #[serde(default)]
    pub topics: Vec<TopicMeta>,
}

impl CourseMeta {
    /// Look up a topic descriptor by id.
    pub fn topic(&self, topic_id: &str) -> Option<&TopicMeta> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// Prefetch hints for every pattern-based topic in this course.
    pub fn load_hints(&self, default_pattern: &str) -> TopicMetaMap {
        self.topics
            .iter()
            .filter(|t| t.strategy == SlideStrategy::Pattern)
            .map(|t| {
                (
                    t.id.clone(),
                    TopicLoadHint {
                        pattern: t.pattern_or(default_pattern).to_string(),
                        slide_count: t.slide_count,
                    },
                )
            })
            .collect()
    }
}

/// What the prefetcher needs to know to warm one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicLoadHint {
    /// Filename pattern containing `{n}`.
    pub pattern: String,
    /// Number of numbered slide files.
    pub slide_count: usize,
}

/// Topic id to load hint, supplied by the caller of the prefetcher.
pub type TopicMetaMap = HashMap<String, TopicLoadHint>;
