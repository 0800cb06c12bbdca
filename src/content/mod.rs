//! コンテンツ生成
//!
//! タグ、プロンプト、リクエストスコープのコンテキスト、記事アセンブラー、
//! それらを順に実行するオーケストレーター。

pub mod article;
pub mod context;
pub mod generator;
pub mod prompts;
pub mod tags;
pub mod types;

pub use article::{ArticleAssembler, SECTION_SEPARATOR};
pub use context::GenerationContext;
pub use generator::ContentGenerator;
pub use prompts::{build_prompt, ArticleSection, Prompt, PromptKind};
pub use tags::ContentTag;
pub use types::{ContentKind, GeneratedContent, GenerationRequest};
