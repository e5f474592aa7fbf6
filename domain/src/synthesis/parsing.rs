//! Best-effort extraction over synthesis markdown.
//!
//! | Function | Returns on no match |
//! |----------|---------------------|
//! | [`extract_diagram`] | `""` |
//! | [`parse_architecture`] | empty fields |
//! | [`missing_sections`] | every heading |
//! | [`derive_feature_name`] | `"generated-spec"` |

use super::{ArchitectureDocument, Component, TradeOff};
use regex::Regex;
use std::sync::LazyLock;

/// Fence tag marking the architecture diagram block.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

const MAX_COMPONENTS: usize = 10;
const MAX_TRADE_OFFS: usize = 5;
const MAX_RESPONSIBILITY_CHARS: usize = 200;
const MAX_TRADE_OFF_SECTION_CHARS: usize = 500;
const FALLBACK_FEATURE_NAME: &str = "generated-spec";

const KNOWN_SERVICES: &[&str] = &[
    "Lambda",
    "DynamoDB",
    "S3",
    "API Gateway",
    "SQS",
    "SNS",
    "EventBridge",
    "Step Functions",
    "Bedrock",
    "SageMaker",
    "CloudFront",
    "Route 53",
    "ECS",
    "EKS",
    "Fargate",
    "EC2",
    "RDS",
    "Aurora",
    "ElastiCache",
    "Kinesis",
    "Cognito",
    "IAM",
    "CloudWatch",
    "X-Ray",
    "AppSync",
    "Amplify",
    "CodePipeline",
    "CodeBuild",
    "CodeDeploy",
    "CloudFormation",
    "CDK",
    "SAM",
    "Secrets Manager",
    "Parameter Store",
    "KMS",
];

static OVERVIEW_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^##\s*(?:Architecture\s+)?Overview[^\n]*$").expect("valid regex")
});
static COMPONENTS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^##\s*(?:Core\s+)?Components[^\n]*$").expect("valid regex")
});
static TRADE_OFFS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^##\s*Trade-?offs?[^\n]*$").expect("valid regex"));
static DIAGRAM_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```mermaid").expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Content of the first fenced block tagged `tag`, trimmed.
///
/// The scan is non-greedy: it stops at the first closing fence after the
/// opening one. Blocks with other tags are skipped.
pub fn extract_fenced_block(text: &str, tag: &str) -> String {
    let pattern = format!(
        r"(?s)```{}[ \t]*\r?\n(?:(.*?)\r?\n)??[ \t]*```",
        regex::escape(tag)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return String::new();
    };
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// The mermaid diagram embedded in a synthesis, or `""`.
///
/// # Examples
///
/// ```
/// use debate_domain::extract_diagram;
///
/// let text = "## Mermaid Diagram\n```mermaid\ngraph TD\n  A --> B\n```\n";
/// assert_eq!(extract_diagram(text), "graph TD\n  A --> B");
/// assert_eq!(extract_diagram("no diagram here"), "");
/// ```
pub fn extract_diagram(text: &str) -> String {
    extract_fenced_block(text, DIAGRAM_LANGUAGE)
}

/// Required headings absent from a synthesis.
pub fn missing_sections(text: &str) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if !OVERVIEW_HEADING.is_match(text) {
        missing.push("Architecture Overview");
    }
    if !COMPONENTS_HEADING.is_match(text) {
        missing.push("Core Components");
    }
    if !DIAGRAM_FENCE.is_match(text) {
        missing.push("Mermaid Diagram");
    }
    if !TRADE_OFFS_HEADING.is_match(text) {
        missing.push("Trade-offs");
    }
    missing
}

/// Scan a synthesis into its sections. Never fails.
pub fn parse_architecture(text: &str, problem: &str) -> ArchitectureDocument {
    ArchitectureDocument {
        overview: section_body(text, &OVERVIEW_HEADING)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        components: section_body(text, &COMPONENTS_HEADING)
            .map(extract_components)
            .unwrap_or_default(),
        diagram: extract_diagram(text),
        trade_offs: section_body(text, &TRADE_OFFS_HEADING)
            .map(extract_trade_offs)
            .unwrap_or_default(),
        feature_name: derive_feature_name(problem),
    }
}

/// Kebab-case name for the problem, at most 30 characters.
///
/// ```
/// use debate_domain::derive_feature_name;
///
/// assert_eq!(derive_feature_name("Build a simple todo app"), "build-a-simple-todo-app");
/// assert_eq!(derive_feature_name("!!!"), "generated-spec");
/// ```
pub fn derive_feature_name(problem: &str) -> String {
    let head: String = problem.chars().take(50).collect::<String>().to_lowercase();
    let cleaned: String = head
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    let dashed = WHITESPACE_RUN.replace_all(cleaned.trim(), "-");
    let mut name = dashed.trim_matches('-').to_string();

    if name.len() > 30 {
        let cut = &name[..30];
        name = match cut.rsplit_once('-') {
            Some((before, _)) => before.to_string(),
            None => cut.to_string(),
        };
    }

    if name.is_empty() {
        FALLBACK_FEATURE_NAME.to_string()
    } else {
        name
    }
}

/// Text after a heading up to the next `##` heading or end of input.
fn section_body<'a>(text: &'a str, heading: &Regex) -> Option<&'a str> {
    let start = heading.find(text)?.end();
    let rest = &text[start..];
    let end = rest.find("\n##").unwrap_or(rest.len());
    Some(&rest[..end])
}

/// A markdown bullet split at its first colon, emphasis stripped.
struct Bullet {
    head: String,
    body: String,
}

/// Bullets (`-` or `*`) with their continuation lines, ending at a blank line.
fn bullets(section: &str) -> Vec<Bullet> {
    let mut items: Vec<String> = Vec::new();
    let mut open = false;

    for line in section.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("- ") || trimmed.starts_with("* ") {
            items.push(trimmed[2..].to_string());
            open = true;
        } else if line.trim().is_empty() {
            open = false;
        } else if open {
            if let Some(last) = items.last_mut() {
                last.push('\n');
                last.push_str(line.trim());
            }
        }
    }

    items
        .into_iter()
        .map(|item| {
            let (head, body) = match item.split_once(':') {
                Some((h, b)) => (h, b),
                None => (item.as_str(), ""),
            };
            Bullet {
                head: head.trim().trim_matches('*').trim().to_string(),
                body: body.trim().trim_start_matches('*').trim().to_string(),
            }
        })
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn categorize_service(service: &str) -> &'static str {
    match service {
        "Lambda" | "ECS" | "EKS" | "Fargate" | "EC2" => "Compute",
        "S3" | "DynamoDB" | "RDS" | "Aurora" | "ElastiCache" => "Storage",
        "SQS" | "SNS" | "EventBridge" | "Kinesis" => "Messaging",
        "API Gateway" | "AppSync" => "API",
        "Bedrock" | "SageMaker" => "AI/ML",
        _ => "Service",
    }
}

fn extract_components(section: &str) -> Vec<Component> {
    let lowered = section.to_lowercase();
    let items = bullets(section);

    let mut components: Vec<Component> = KNOWN_SERVICES
        .iter()
        .filter(|service| lowered.contains(&service.to_lowercase()))
        .map(|service| {
            let service_lower = service.to_lowercase();
            let responsibility = items
                .iter()
                .find(|b| b.head.to_lowercase().starts_with(&service_lower))
                .map(|b| truncate_chars(&b.body, MAX_RESPONSIBILITY_CHARS))
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| format!("Provides {} functionality", service));
            Component {
                name: service.to_string(),
                service_type: categorize_service(service).to_string(),
                responsibility,
            }
        })
        .collect();

    if components.is_empty() {
        components = items
            .into_iter()
            .filter(|b| !b.head.is_empty())
            .map(|b| {
                let responsibility = if b.body.is_empty() {
                    format!("Handles {} functionality", b.head)
                } else {
                    truncate_chars(&b.body, MAX_RESPONSIBILITY_CHARS)
                };
                Component {
                    name: b.head,
                    service_type: "Service".to_string(),
                    responsibility,
                }
            })
            .collect();
    }

    components.truncate(MAX_COMPONENTS);
    components
}

fn extract_trade_offs(section: &str) -> Vec<TradeOff> {
    let mut trade_offs: Vec<TradeOff> = bullets(section)
        .into_iter()
        .filter(|b| !b.head.is_empty())
        .map(|b| TradeOff {
            aspect: b.head,
            description: b.body,
        })
        .collect();

    if trade_offs.is_empty() && !section.trim().is_empty() {
        trade_offs.push(TradeOff {
            aspect: "Architecture Trade-offs".to_string(),
            description: truncate_chars(section.trim(), MAX_TRADE_OFF_SECTION_CHARS),
        });
    }

    trade_offs.truncate(MAX_TRADE_OFFS);
    trade_offs
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "## Architecture Overview
A serverless-first, globally replicated todo platform.

## Core Components
- **Lambda**: Runs the API handlers
- **DynamoDB**: Global tables for todos
- **Bedrock**: Suggests task priorities

## Mermaid Diagram
```mermaid
graph TD
  A[User] --> B[API Gateway]
  B --> C[Lambda]
```

## Trade-offs
- **Cost vs latency**: Global tables double write cost
- **Simplicity**: Werner wanted cells, Jeff won
";

    #[test]
    fn test_extract_tagged_block() {
        let text = "abc\n```diagram\nX\nY\n```\ndef";
        assert_eq!(extract_fenced_block(text, "diagram"), "X\nY");
    }

    #[test]
    fn test_empty_block_stops_at_its_own_fence() {
        let text = "## Mermaid Diagram\n```mermaid\n```\n\n## Notes\n```python\nprint(1)\n```\n";
        assert_eq!(extract_diagram(text), "");
        assert_eq!(extract_fenced_block(text, "python"), "print(1)");
    }

    #[test]
    fn test_extract_diagram_missing() {
        assert_eq!(extract_diagram("## Architecture Overview\nSome text"), "");
    }

    #[test]
    fn test_only_tagged_block_is_extracted() {
        let text = "```python\nprint('hi')\n```\n\n```mermaid\ngraph LR\n  A --> B\n```\n";
        assert_eq!(extract_diagram(text), "graph LR\n  A --> B");
    }

    #[test]
    fn test_first_block_wins_non_greedy() {
        let text = "```mermaid\nfirst\n```\ntext\n```mermaid\nsecond\n```";
        assert_eq!(extract_diagram(text), "first");
    }

    #[test]
    fn test_sample_diagram() {
        assert_eq!(
            extract_diagram(SAMPLE),
            "graph TD\n  A[User] --> B[API Gateway]\n  B --> C[Lambda]"
        );
    }

    #[test]
    fn test_missing_sections() {
        assert!(missing_sections(SAMPLE).is_empty());
        assert_eq!(
            missing_sections("just prose"),
            vec![
                "Architecture Overview",
                "Core Components",
                "Mermaid Diagram",
                "Trade-offs"
            ]
        );
    }

    #[test]
    fn test_parse_architecture() {
        let doc = parse_architecture(SAMPLE, "Build a simple todo app that scales");
        assert_eq!(
            doc.overview,
            "A serverless-first, globally replicated todo platform."
        );

        let names: Vec<&str> = doc.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Lambda", "DynamoDB", "Bedrock"]);
        assert_eq!(doc.components[0].service_type, "Compute");
        assert_eq!(doc.components[0].responsibility, "Runs the API handlers");
        assert_eq!(doc.components[2].service_type, "AI/ML");

        assert_eq!(doc.trade_offs.len(), 2);
        assert_eq!(doc.trade_offs[0].aspect, "Cost vs latency");
        assert_eq!(
            doc.trade_offs[0].description,
            "Global tables double write cost"
        );
        assert!(doc.diagram.starts_with("graph TD"));
        assert_eq!(doc.feature_name, "build-a-simple-todo-app-that");
    }

    #[test]
    fn test_generic_components_fallback() {
        let text = "## Core Components\n- Ledger: Append-only record\n- Relay: Store and forward\n";
        let doc = parse_architecture(text, "p");
        assert_eq!(doc.components.len(), 2);
        assert_eq!(doc.components[0].name, "Ledger");
        assert_eq!(doc.components[0].service_type, "Service");
        assert_eq!(doc.components[1].responsibility, "Store and forward");
    }

    #[test]
    fn test_trade_offs_without_bullets() {
        let text = "## Trade-offs\nEverything is a compromise.\n";
        let doc = parse_architecture(text, "p");
        assert_eq!(doc.trade_offs.len(), 1);
        assert_eq!(doc.trade_offs[0].aspect, "Architecture Trade-offs");
        assert_eq!(doc.trade_offs[0].description, "Everything is a compromise.");
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_architecture("", "");
        assert!(doc.overview.is_empty());
        assert!(doc.components.is_empty());
        assert!(doc.trade_offs.is_empty());
        assert_eq!(doc.diagram, "");
        assert_eq!(doc.feature_name, "generated-spec");
    }

    #[test]
    fn test_feature_names() {
        assert_eq!(
            derive_feature_name("Create an AI-powered chatbot!!!"),
            "create-an-aipowered-chatbot"
        );
        assert_eq!(
            derive_feature_name("Mars Digital Currency System"),
            "mars-digital-currency-system"
        );
        assert_eq!(
            derive_feature_name("   Spaces   everywhere   "),
            "spaces-everywhere"
        );
        assert!(derive_feature_name(&"word ".repeat(20)).len() <= 30);
    }
}
