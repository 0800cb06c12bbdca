//! Prompt Builder
//!
//! コンテンツ種別と生成コンテキストからプロンプト本文とトークン予算を組み立てる純粋関数。
//! 文字数制限や禁止語などの書式制約はプロンプト本文にそのまま埋め込まれ、生成後の検証は行わない。

use crate::content::context::GenerationContext;
use crate::content::tags::ContentTag;

/// Token budget of each article section.
pub const ARTICLE_SECTION_TOKENS: u32 = 500;

/// Token budget of unknown tags.
pub const DEFAULT_TOKENS: u32 = 100;

/// 記事セクション番号（1-4）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleSection(u8);

impl ArticleSection {
    /// 生成順の全セクション
    pub const ALL: [ArticleSection; 4] = [
        ArticleSection(1),
        ArticleSection(2),
        ArticleSection(3),
        ArticleSection(4),
    ];

    pub fn new(index: u8) -> Option<Self> {
        (1..=4).contains(&index).then_some(Self(index))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    fn template(&self) -> &'static str {
        match self.0 {
            1 => ARTICLE_SECTION_1,
            2 => ARTICLE_SECTION_2,
            3 => ARTICLE_SECTION_3,
            _ => ARTICLE_SECTION_4,
        }
    }
}

/// プロンプトの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// 単一フィールドのタグ
    Tag(ContentTag),
    /// 記事セクション
    ArticleSection(ArticleSection),
}

impl From<ContentTag> for PromptKind {
    fn from(tag: ContentTag) -> Self {
        PromptKind::Tag(tag)
    }
}

impl From<ArticleSection> for PromptKind {
    fn from(section: ArticleSection) -> Self {
        PromptKind::ArticleSection(section)
    }
}

/// 組み立て済みプロンプト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub max_tokens: u32,
}

/// Builds the prompt text and output token budget for `kind`.
///
/// The article tag itself has no single prompt; it is generated through its
/// four sections, so asking for it here yields the generic prompt.
pub fn build_prompt(kind: &PromptKind, ctx: &GenerationContext) -> Prompt {
    let (template, max_tokens) = match kind {
        PromptKind::Tag(ContentTag::KeywordList) => (KEYWORD_LIST, 150),
        PromptKind::Tag(ContentTag::PageTitle) => (PAGE_TITLE, 20),
        PromptKind::Tag(ContentTag::MetaTitle) => (META_TITLE, 30),
        PromptKind::Tag(ContentTag::MetaDescription) => (META_DESCRIPTION, 60),
        PromptKind::Tag(ContentTag::UrlWiki) => (URL_WIKI, 60),
        PromptKind::Tag(ContentTag::Article) | PromptKind::Tag(ContentTag::Custom(_)) => {
            (GENERIC, DEFAULT_TOKENS)
        }
        PromptKind::ArticleSection(section) => (section.template(), ARTICLE_SECTION_TOKENS),
    };

    Prompt {
        text: render(template, ctx),
        max_tokens,
    }
}

/// Substitutes `{{name}}` placeholders in one left-to-right pass.
///
/// Substituted values are never rescanned, so generated text that happens to
/// contain a placeholder is inserted verbatim.
fn render(template: &str, ctx: &GenerationContext) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let value = match &after[..end] {
            "keyword" => Some(ctx.keyword.as_str()),
            "url" => Some(ctx.url.as_str()),
            "keyword_list" => Some(ctx.keyword_list()),
            "page_title" => Some(ctx.page_title()),
            "reference_link" => Some(ctx.reference_link()),
            _ => None,
        };
        match value {
            Some(value) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                // not a placeholder; keep the first brace and move on
                out.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// Verbatim prompt wording, typos included.
const GENERIC: &str = "Generate content for {{keyword}}";

const KEYWORD_LIST: &str = r#"Based on: {{keyword}} and {{url}}, create a list of top 20 high volume keywords matching the {{keyword}}/{{url}} separated by line with no numeration, numbers or special characters of the top sub-product categories without any intro's or explanations just the keywords.
Rule: No brackets in output, No titles just the keyword in output, No symbols in output
Format:
No symbols, numbers or brackets in output
"#;

const PAGE_TITLE: &str = r#"Rules: Avoid using the word "needs";
IMPORTANT: Do not add | Company Name at the end;
No : in output;
No "" in output;
No ' in output;
No ! in output;
no - in output;
No : in output;
Do not mention blog in output;
Do not mention article in output;
Do not include colors in output;
Max 55 characters;
Follow Google Best Practices, do not keyword stuff, exclude how many in packs, and ensure meta titles are no more than 55 characters long.;
do not mention how many in packs;
Prompt:
Write page title starting with top or npbest {{keyword}}. Title could include some keywords from {{keyword_list}} relevant to the {{keyword}} in natural language, readable. total length of page title must be under 55 characters in total.
Format: {output}
"#;

const META_TITLE: &str = r#"Rules: Avoid using the word ""needs""; No "" in output; No ' in output; No ! in output;
Max 55 characters;
Do not write meta title in output;
Follow Google Best Practices, avoid the use of a comma in output, do not keyword stuff, and ensure meta titles are no more than 55 characters long;
Use variations to add appeal. Showcase popularity and recognition through Trending Now phrases;
Do not write CTA in output;
Prompt:
The meta title format should be: {{page_title}}, followed by the most pertinent part of the {{keyword_list}} with high-volume keywords that provide value based on features making customers want to learn more, with only one sentence. after a "-" or "|" it may include a short CTA like learn, top resource, or other informational CTA keep this highly variable focusing on click through rate of customers.
All structured around customer needs - we aim at higher click-through rates alongside enhanced engagement which aligns with Google's standards while keeping Call-To-Action repetition under 5%."
Meta Title: {output} 
"#;

const META_DESCRIPTION: &str = r#"Rule: No brackets in output
Max 155 characters, shorten if neccessary;
Do not mention company name
Prompt: Write a meta description that incorporate actionable phrases and offer a distinct motivation for potential customers to read the article:{{page_title}}. Maintain a tone that echoes the brand's messaging. Refrain from using an overabundance of capital letters or punctuation that could be interpreted as intrusive or spam-like. Insert pertinent keywords naturally to align with SEO best practices while ensuring that the description is an accurate portrayal of the respective {{page_title}}.
Format {output}
"#;

const URL_WIKI: &str = r#"Rule: No brackets in output
Rules:
only one href link, nothing else in output;
Do not add title, just the raw link;
Prompt:
write the link to a relevant wikipidea article to be used as an external link
Format: {Output}
"#;

const ARTICLE_SECTION_1: &str = r#"Rule: No "[]" or "{}" in output.
Rule: Do not use the word "offerings" in the output.
Rule: Do not use the word "needs" in the output.
Rule: DO NOT use ":" in titles, use "-" instead.
Rule: Include proper HTML formatting.
Rule: Write in a readable format with clear paragraphs.
Rule: Do not create lists unless explicitly instructed.

Prompt:

<p>Explain why the client should buy/use {{keyword}} in the first paragraph. Write confidently in a Wikipedia style, naming the segment of clients who would benefit most from this product/service without asking questions. Explain why it's the best choice, providing clear reasons and avoiding generic statements like "it's a good choice."</p>

<p>Write a minimum 350-word paragraph about {{keyword}}, highlighting its unique value proposition. Use at least 5 high-volume keywords relevant to someone looking to buy {{keyword}}. Ensure the text is clickbait but without special characters.</p>

<h2>{{keyword}} Top Features</h2>
<ul>
  <li>Feature 1</li>
  <li>Feature 2</li>
  <li>Feature 3</li>
</ul>

<a class="action tocart primary" href="{{url}}" target="_blank" data-link-type="default" data-element="link" data-pb-style="RQGFH2A" alt="Learn more about {{keyword}} and related products">
  <span data-element="link_text">Learn more about {{keyword}}</span>
</a><br>

<h2>What is {{keyword}}</h2>
<p>Write an informational, direct paragraph about {{keyword}}, referencing {{reference_link}} without mentioning Wikipedia. The href alt tag should explain the link content in under 50 characters. Write a 400-word Wikipedia-style description.</p>

<h3>Different Uses for {{keyword}}</h3>
<ul>
  <li>Use 1</li>
  <li>Use 2</li>
  <li>Use 3</li>
</ul>

<h2>Top {{keyword}}</h2>
<p>Explain the value {{keyword}} provides to different customer segments.</p>

<h2>{{keyword}} Benefits</h2>
<p>List the benefits of {{keyword}}. Include a <ul> list highlighting important features for various use cases.</p>
"#;

const ARTICLE_SECTION_2: &str = r#"Rule: no "[]" or "{}" in output;
Do not use "offerings" in output;
Rule: Do not use "needs" in output;
Rule: DO NOT use ":" in titles, use "-" instead;
Rule: Include proper HTML formatting;
Rule: Repeat all <h3> until you have written about every keyword in {{keyword_list}} list, skipping "other" content
Prompt:
<h2>{{keyword_list}} name variation</h2>
<p>Aiming EAT (Expertise, Authoritativeness, Trustworthiness) guidelines & Google's Natural Language Algorithm without saying that, write an informational paragraph in the style of Wikipedia minimum 200 words. Explain why this {{keyword}} would present benefits to a customer.</p>
(Repeat for all {{keyword_list}})
<h3>{{keyword_list}} xx (choose a keyword from {{keyword_list}})</h3>
<p>Write a summary of {{keyword_list}} xx with minimum 150 characters also describing {{keyword}}.</p>
<h3>{{keyword_list}} xx (choose a keyword from {{keyword_list}})</h3>
<p>Write a summary of {{keyword_list}} xx with minimum 150 characters also describing {{keyword}}</p> 
"#;

const ARTICLE_SECTION_3: &str = r#"Rule: no "[]" or "{}" in output;
Do not use "offerings" in output;
Rule: Do not use "needs" in output;
Rule: DO NOT use ":" in titles, use "-" instead;
Rule: Include proper HTML formatting;
Prompt:
<h2><b>New {{keyword}} {Innovations {Use variations of this title and write it different every time but make sure its talking about the {{keyword}} and its category of products/services}</b></h2>
<p>Write a paragraph informational of what new things are happening and changing for {{keyword}} in depth and how its changed and is changing with a <ul> list of changes of at least 3, and what's said to be coming, explaining each technical, informational detail</p> Go into detail on each innovation as an expert.</p>
<h2>{{{keyword}} name variation}</h2>
<p>{Aiming EAT (Expertise, Authoritativeness, Trustworthiness) guidelines & Google's Natural Language Algorithm without saying that, write an informational paragraph in the style of Wikipedia minimum 200 words. Explain why this {{keyword}} would present benefits to a customer.}</p>
RULE FOR NEXT PROMPT: {Repeat for all [keywords]}
<h3>{{keyword_list}} (choose a keyword from {{keyword_list}}</h3>
<p>Write a summary of the keyword you have selected in the h3 title with minimum 150 characters also describing {{keyword}}.</p>
<h3>{{keyword_list}} (choose a keyword from {{keyword_list}}</h3>
<p>Write a summary of the keyword you have selected in the h3 title with minimum 150 characters also describing {{keyword}}</p>
<h2><b>[keyword name{s}] For Sale</b></h2>
<h3> {{keyword}} {Category}</h3>
<p>summary of {{keyword}} sub category by writing a 50-word paragraph explaining what the product is and whichever other relevant info</p></li> </ul>
<h2>{{keyword}} Reviews</h2> <p>Always write an informational 150-word paragraph about {{keyword}} Reviews</p> Write a list of the top type of good reviews this product/service receives and why<ul><li></li></ul>
<h2> Trending {{keyword}} 2024</h2>
<p> Write an informational but direct paragraph what values the {{keyword}} provides and who it benefits the most.</p>
"#;

const ARTICLE_SECTION_4: &str = r#"Rule: no "[]" or "{}" in output;
Do not use "offerings" in output;
Rule: Do not use "needs" in output;
Rule: DO NOT use ":" in titles, use "-" instead;
Rule: Include proper HTML formatting;
Prompt:
<h2> What to look for {in/with/etc} {{keyword}}</h2>
<p> Write an informational but direct paragraph what values the {{keyword}} provides and who it benefits the most. Talk about space, mobility, price, value, features and then add who segment most benefits from this product.</p>
<h2>Top {{keyword}} Financing Options</h2>
<p>Write about what some of the top financed products from this {{keyword}} In one concise paragraph write a wikipedia style paragraph why customers would use financing, as a financing expert give the customer the expert values on why to finance the product and the low rates and saving money by doing so. Do not include financing for non-equipment type products, then talk about larger orders, ordering bulk and the values on sustainability by doing so.</p>
<a class=“action tocart primary” href=“[Finance Link]” target=“_blank” data-link-type=“default” data-element=“link” data-pb-style=“RQGFH2A” alt="[Product name {simplify name to brand and sku} Financing]"><span data-element=“link_text”>Finance {{keyword}} Products</span></a><br>
<h2>{{keyword}} FAQ</h2>
<p>{Answer questions about what is a {{keyword}} FAQ in a short informational paragraph always mentioning the with max 100 words} regarding the {{keyword}}, and features based on {{keyword}}</p>
Write questions and answers to the top questions related to the [category] and [Product name] in form of snippet questions and longtail keywords asked with high-volume keywords and phrases written in following format: <h3></h3> <p></p>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GenerationContext {
        GenerationContext::new("garden hose", "https://x.test")
    }

    #[test]
    fn test_token_budgets() {
        let c = ctx();
        let budget = |tag: ContentTag| build_prompt(&tag.into(), &c).max_tokens;
        assert_eq!(budget(ContentTag::KeywordList), 150);
        assert_eq!(budget(ContentTag::PageTitle), 20);
        assert_eq!(budget(ContentTag::MetaTitle), 30);
        assert_eq!(budget(ContentTag::MetaDescription), 60);
        assert_eq!(budget(ContentTag::UrlWiki), 60);
        assert_eq!(budget(ContentTag::Custom("faq".into())), DEFAULT_TOKENS);
        for section in ArticleSection::ALL {
            assert_eq!(
                build_prompt(&section.into(), &c).max_tokens,
                ARTICLE_SECTION_TOKENS
            );
        }
    }

    #[test]
    fn test_unknown_tag_uses_generic_prompt() {
        let prompt = build_prompt(&ContentTag::Custom("faq".into()).into(), &ctx());
        assert_eq!(prompt.text, "Generate content for garden hose");
    }

    #[test]
    fn test_constraints_are_embedded() {
        let title = build_prompt(&ContentTag::PageTitle.into(), &ctx()).text;
        assert!(title.contains("Max 55 characters"));
        assert!(title.contains(r#"Avoid using the word "needs""#));

        let description = build_prompt(&ContentTag::MetaDescription.into(), &ctx()).text;
        assert!(description.contains("Max 155 characters"));

        let section = build_prompt(&ArticleSection::ALL[0].into(), &ctx()).text;
        assert!(section.contains(r#"Do not use the word "offerings""#));
    }

    #[test]
    fn test_context_is_interpolated() {
        let mut c = ctx();
        c.keyword_list = Some("soaker hose".to_string());
        c.page_title = Some("Best Garden Hose Picks".to_string());
        c.reference_link = Some("https://en.wikipedia.org/wiki/Garden_hose".to_string());

        let meta = build_prompt(&ContentTag::MetaTitle.into(), &c).text;
        assert!(meta.contains("Best Garden Hose Picks"));
        assert!(meta.contains("soaker hose"));

        let section1 = build_prompt(&ArticleSection::ALL[0].into(), &c).text;
        assert!(section1.contains("href=\"https://x.test\""));
        assert!(section1.contains("https://en.wikipedia.org/wiki/Garden_hose"));

        let section2 = build_prompt(&ArticleSection::ALL[1].into(), &c).text;
        assert!(section2.contains("soaker hose"));
    }

    #[test]
    fn test_wording_matches_dashboard_prompts() {
        let c = ctx();
        let meta = build_prompt(&ContentTag::MetaTitle.into(), &c).text;
        assert!(meta.contains("All structured around customer needs - "));

        let wiki = build_prompt(&ContentTag::UrlWiki.into(), &c).text;
        assert!(wiki.contains("relevant wikipidea article to be used as an external link"));
        assert!(!wiki.contains("garden hose"));

        let section3 = build_prompt(&ArticleSection::ALL[2].into(), &c).text;
        assert!(section3.contains("<h2> Trending garden hose 2024</h2>"));
    }

    #[test]
    fn test_deterministic() {
        let c = ctx();
        let a = build_prompt(&ArticleSection::ALL[2].into(), &c);
        let b = build_prompt(&ArticleSection::ALL[2].into(), &c);
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_keeps_literal_braces() {
        let section3 = build_prompt(&ArticleSection::ALL[2].into(), &ctx()).text;
        assert!(section3.contains("<h2>{garden hose name variation}</h2>"));
        assert!(section3.contains("{Category}"));
        assert!(!section3.contains("{{"));
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let mut c = ctx();
        c.keyword_list = Some("{{url}}".to_string());
        let prompt = build_prompt(&ArticleSection::ALL[1].into(), &c).text;
        assert!(prompt.contains("{{url}} name variation"));
    }

    #[test]
    fn test_section_bounds() {
        assert!(ArticleSection::new(0).is_none());
        assert!(ArticleSection::new(5).is_none());
        assert_eq!(ArticleSection::new(4).map(|s| s.index()), Some(4));
    }
}
