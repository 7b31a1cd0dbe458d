//! Tests for justified question answering.

mod common;

use std::sync::Arc;

use adk_docqa::{ANSWER_APOLOGY, DocQaConfig, GenerationParams, JustifiedResponder};
use adk_docqa::EmbeddingProvider;
use common::{ScriptedGenerator, UncheckedCosine, VocabEmbedder, fenced};

const SKY: &str = "The sky is blue. Grass is green. Water is wet.";

fn responder(
    script: ScriptedGenerator,
    embedder: impl EmbeddingProvider + 'static,
) -> (JustifiedResponder, Arc<ScriptedGenerator>) {
    let script = Arc::new(script);
    let responder =
        JustifiedResponder::new(script.clone(), Arc::new(embedder), &DocQaConfig::default());
    (responder, script)
}

#[tokio::test]
async fn answers_with_the_most_similar_sentence() {
    let (responder, script) = responder(ScriptedGenerator::always("Blue."), VocabEmbedder::new());

    let response = responder.ask("What color is the sky?", SKY).await;

    assert_eq!(response.answer, "Blue.");
    assert_eq!(response.context, "The sky is blue. Grass is green. Water is wet.");
    assert_eq!(response.justification(), "Supported by Line 1: \"The sky is blue\"");

    let prompt = &script.prompts()[0];
    assert!(prompt.contains("What color is the sky?"));
    assert_eq!(fenced(prompt).trim(), response.context);
}

#[tokio::test]
async fn line_numbers_count_dropped_pieces() {
    let text = "Ok. The moon orbits the earth. Cats purr loudly when happy.";
    let (responder, _) = responder(ScriptedGenerator::always("It orbits."), VocabEmbedder::new());

    let response = responder.ask("Where does the moon orbit?", text).await;

    let source = response.source.expect("a qualifying sentence");
    assert_eq!(source.line, 2);
    assert_eq!(source.sentence, "The moon orbits the earth");
    assert!(!response.context.contains("Ok"));
}

#[tokio::test]
async fn no_qualifying_sentences_gives_empty_justification() {
    let (responder, script) = responder(ScriptedGenerator::always("Unsure."), VocabEmbedder::new());

    let response = responder.ask("Anything?", "Hi. Short. Tiny bit.").await;

    assert!(response.source.is_none());
    assert_eq!(response.context, "");
    assert_eq!(response.justification(), "");
    assert_eq!(response.answer, "Unsure.");
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn generation_failure_apologizes_but_keeps_the_source() {
    let (responder, _) = responder(ScriptedGenerator::failing(), VocabEmbedder::new());

    let response = responder.ask("What color is the sky?", SKY).await;

    assert_eq!(response.answer, ANSWER_APOLOGY);
    assert_eq!(response.justification(), "Supported by Line 1: \"The sky is blue\"");
}

#[tokio::test]
async fn sentences_that_fail_to_embed_rank_last() {
    let (responder, _) =
        responder(ScriptedGenerator::always("Green?"), VocabEmbedder::failing_on("blue"));

    let response = responder.ask("What color is the sky?", SKY).await;

    assert_eq!(response.justification(), "Supported by Line 2: \"Grass is green\"");
    assert!(response.context.ends_with("The sky is blue"));
}

#[tokio::test]
async fn context_holds_at_most_three_sentences() {
    let text = "Rivers carry sediment downstream. Mountains erode over millennia. \
                Deltas form where rivers meet the sea. Glaciers carve deep valleys. \
                Wind shapes desert dunes";
    let (responder, _) = responder(ScriptedGenerator::always("Deltas."), VocabEmbedder::new());

    let response = responder.ask("Where do deltas form?", text).await;

    assert_eq!(response.context.split(". ").count(), 3);
    assert!(response.context.starts_with("Deltas form where rivers meet the sea"));
    assert_eq!(response.source.map(|s| s.line), Some(3));
}

#[tokio::test]
async fn answer_generation_is_greedy_and_bounded() {
    let (responder, script) = responder(ScriptedGenerator::always("Blue."), VocabEmbedder::new());

    responder.ask("What color is the sky?", SKY).await;

    assert_eq!(script.params(), vec![GenerationParams::greedy(128)]);
}

#[tokio::test]
async fn question_embedding_failure_keeps_document_order() {
    let embedder = Arc::new(VocabEmbedder::failing_on("zebra"));
    let script = Arc::new(ScriptedGenerator::always("Not sure."));
    let responder =
        JustifiedResponder::new(script.clone(), embedder.clone(), &DocQaConfig::default());

    let text = "Ok. Water is wet today. The sky is blue. Grass is green";
    let response = responder.ask("Do zebras like the blue sky?", text).await;

    assert_eq!(response.justification(), "Supported by Line 2: \"Water is wet today\"");
    assert_eq!(response.context, "Water is wet today. The sky is blue. Grass is green");
    assert_eq!(response.answer, "Not sure.");
    // sentences are not embedded once the question fails
    assert_eq!(embedder.calls(), 1);
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn nan_similarities_rank_last() {
    let text = (0..60)
        .map(|i| {
            if i % 3 == 0 {
                format!("Sentence {i} mentions poison ivy")
            } else {
                format!("Sentence {i} describes the garden")
            }
        })
        .collect::<Vec<_>>()
        .join(". ");
    let embedder = UncheckedCosine(VocabEmbedder::nan_on("poison"));
    let (responder, _) = responder(ScriptedGenerator::always("The garden."), embedder);

    let response = responder.ask("Which sentence describes the garden?", &text).await;

    let source = response.source.expect("a ranked sentence");
    assert_eq!(source.line, 2);
    assert_eq!(source.sentence, "Sentence 1 describes the garden");
    assert!(!response.context.contains("poison"));
}

#[tokio::test]
async fn nan_embeddings_score_neutral_with_default_similarity() {
    let text = "The lake is poison green. The garden grows tall roses";
    let (responder, _) =
        responder(ScriptedGenerator::always("Roses."), VocabEmbedder::nan_on("poison"));

    let response = responder.ask("What grows in the garden?", text).await;

    assert_eq!(response.source.map(|s| s.line), Some(2));
}
