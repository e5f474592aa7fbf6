//! Canned reply text for the offline gateway

use debate_domain::Persona;

/// Round number announced in a turn prompt (`Round N (...)`).
pub(super) fn round_of(prompt: &str) -> Option<u8> {
    prompt.lines().find_map(|line| {
        let rest = line.strip_prefix("Round ")?;
        rest.split_whitespace().next()?.parse().ok()
    })
}

/// Problem text from the first line of a turn prompt.
pub(super) fn problem_of(prompt: &str) -> &str {
    prompt
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Problem: "))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("this problem")
}

pub(super) fn panelist(persona: Persona, round: u8, problem: &str) -> String {
    match (persona, round) {
        (Persona::JeffBarr, 1) => format!(
            "Here's the simple approach... For \"{problem}\" we put API Gateway in front of a \
             handful of Lambda functions, keep state in DynamoDB, and let EventBridge fan out \
             anything asynchronous. No servers to patch, no clusters to size. If it needs a \
             workflow, Step Functions. That's the whole thing."
        ),
        (Persona::JeffBarr, 2) => "Here's the simple approach... Swami, I love the speed, but \
             a fine-tuned model is a second product. Start with Bedrock on-demand behind one \
             Lambda. Werner, cell-based routing is great at a million users; we have zero. \
             Managed services give us the blast radius isolation for free."
            .to_string(),
        (Persona::JeffBarr, _) => "Here's the simple approach... I can live with Werner's \
             cells if each cell is just a copy of the serverless stack: Lambda, DynamoDB, \
             EventBridge. Swami gets Bedrock for the smart parts. We agree on managed services \
             everywhere and nobody runs Kubernetes."
            .to_string(),
        (Persona::Swami, 1) => format!(
            "We can ship this in weeks... \"{problem}\" is a prediction problem dressed up as a \
             platform. Put Bedrock agents in front, use SageMaker for the one model we actually \
             need, and launch an MVP to a small group. Real usage data beats any whiteboard \
             design we argue about today."
        ),
        (Persona::Swami, 2) => "We can ship this in weeks... Jeff, on-demand Bedrock is fine \
             for launch, but the feedback loop is the product. Werner, chaos engineering before \
             we have customers is how teams miss the market. Ship, measure, then harden what \
             actually breaks."
            .to_string(),
        (Persona::Swami, _) => "We can ship this in weeks... Agreed on serverless cells. \
             Phase one: Bedrock plus Lambda in a single cell, behind a feature flag. Phase two: \
             SageMaker for the custom model once we have data. Werner's failure drills run \
             from day one, just not before launch."
            .to_string(),
        (Persona::WernerVogels, 1) => format!(
            "Everything fails, all the time. Nobody has said what happens to \"{problem}\" when \
             a region goes dark. I want cell-based architecture, idempotent APIs, and queues \
             between every service. Show me the failure modes first, then pick the services."
        ),
        (Persona::WernerVogels, 2) => "Jeff, managed services still fail; you just fail \
             with less visibility. Swami, shipping without backpressure is shipping an outage. \
             APIs are forever, so design the contract now. SQS between the edges, DynamoDB \
             global tables, and a cost budget per cell."
            .to_string(),
        (Persona::WernerVogels, _) => "Fine. Serverless inside each cell, cells behind a \
             thin routing layer, SQS between producers and consumers, and Bedrock calls with \
             timeouts and fallbacks. You build it, you run it: every team owns a cell's \
             dashboards. That's an architecture I'd sign."
            .to_string(),
    }
}

/// Architecture document with every section the parser looks for.
pub(super) fn synthesis(transcript: &str) -> String {
    let turns = transcript.matches(" - Round ").count();
    format!(
        r#"## Architecture Overview
A cell-based serverless platform assembled from {turns} panel contributions. Each cell is a
self-contained Lambda and DynamoDB stack, AI features run on Bedrock, and queues decouple
every boundary so any single failure stays inside its cell.

## Core Components
- API Gateway: single entry point routing requests to the owning cell
- AWS Lambda: stateless business logic per cell
- Amazon DynamoDB: global tables for cell state
- Amazon Bedrock: foundation models for the smart features
- Amazon SQS: backpressure between producers and consumers
- AWS Step Functions: long-running workflows

## Mermaid Diagram
```mermaid
graph TD
    User[Client] --> APIGW[API Gateway]
    APIGW --> Router[Cell Router]
    Router --> Cell1[Cell: Lambda + DynamoDB]
    Router --> Cell2[Cell: Lambda + DynamoDB]
    Cell1 --> Queue[SQS]
    Cell2 --> Queue
    Queue --> Workflow[Step Functions]
    Workflow --> AI[Bedrock]
```

## Trade-offs
- Simplicity vs resilience: cells add a routing layer Jeff would rather not own
- Speed vs hardening: Swami's MVP ships first, Werner's failure drills follow
- Cost vs isolation: duplicated stacks per cell raise the baseline bill
"#
    )
}
