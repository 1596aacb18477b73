//! End-to-end retrieval scenarios against hand-built chunk sets.

use navi_retrieval::embedding::bucket;
use navi_retrieval::{
    quantize, retrieve, Chunk, Fnv1aHasher, InMemoryChunkSource, QueryEmbedder, Retriever,
    SearchConfig, INTRO_LINE,
};

fn chunk(id: &str, text: &str, embedding: Vec<u8>) -> Chunk {
    Chunk::builder()
        .id(id)
        .text(text)
        .doc_id(format!("doc-{}", id))
        .embedding(embedding)
        .build()
        .unwrap()
}

/// Quantized embedding of a single bucket set to 1.0
fn one_hot(hot: usize) -> Vec<u8> {
    let mut v = vec![0.0; 64];
    v[hot] = 1.0;
    quantize(&v)
}

#[test]
fn apple_banana_ranks_aligned_chunk_first() {
    let embedder = QueryEmbedder::default();
    let apple = bucket(&Fnv1aHasher, "apple", 64).unwrap();
    let banana = bucket(&Fnv1aHasher, "banana", 64).unwrap();
    let other = (0..64).find(|b| *b != apple && *b != banana).unwrap();

    let chunks = vec![
        chunk("A", "about apples", quantize(&embedder.embed("apple"))),
        chunk("B", "unrelated", one_hot(other)),
    ];

    let answer = retrieve("apple banana", &chunks);

    assert_eq!(answer.snippets.len(), 2);
    assert_eq!(answer.snippets[0].id, "A");
    assert_eq!(answer.snippets[1].id, "B");
    assert!(answer.snippets[0].score > answer.snippets[1].score);
    assert_eq!(
        answer.text,
        format!("{}\n- about apples\n- unrelated\n", INTRO_LINE)
    );
}

#[test]
fn empty_chunk_list_returns_intro_only() {
    let answer = retrieve("anything at all", &[]);
    assert!(answer.snippets.is_empty());
    assert_eq!(answer.text, format!("{}\n", INTRO_LINE));
    assert_eq!(answer.question, "anything at all");
}

#[test]
fn punctuation_only_question_keeps_input_order() {
    let chunks: Vec<Chunk> = (0..5)
        .map(|i| chunk(&format!("c{}", i), &format!("note {}", i), one_hot(i * 7)))
        .collect();

    let answer = retrieve("???", &chunks);

    let ids: Vec<&str> = answer.snippets.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["c0", "c1", "c2"]);
    assert!(answer.snippets.iter().all(|s| s.score == 0.0));
}

#[test]
fn malformed_record_ranks_below_positive_matches() {
    let embedder = QueryEmbedder::default();
    let chunks = vec![
        chunk("broken", "truncated blob", vec![200; 10]),
        chunk("good", "Flutter desktop", quantize(&embedder.embed("Flutter"))),
    ];

    let answer = retrieve("Flutter", &chunks);
    assert_eq!(answer.snippets[0].id, "good");
    assert_eq!(answer.snippets[1].id, "broken");
    assert_eq!(answer.snippets[1].score, 0.0);
}

#[test]
fn malformed_record_scores_zero_ahead_of_negative_scores() {
    let embedder = QueryEmbedder::default();
    // "zebra" shares no bucket with "Flutter"; its 127-byte components
    // decode slightly below zero, so the cosine is negative.
    let chunks = vec![
        chunk("unrelated", "zebra facts", quantize(&embedder.embed("zebra"))),
        chunk("broken", "truncated blob", vec![200; 3]),
        chunk("good", "Flutter desktop", quantize(&embedder.embed("Flutter"))),
    ];

    let answer = retrieve("Flutter", &chunks);
    let ids: Vec<&str> = answer.snippets.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["good", "broken", "unrelated"]);

    assert!(answer.snippets[0].score > 0.0);
    assert_eq!(answer.snippets[1].score, 0.0);
    assert!(answer.snippets[2].score < 0.0);
    assert!((answer.snippets[2].score + 0.003_919_670_284_931_642).abs() < 1e-12);
}

#[test]
fn configurable_k() {
    let retriever = Retriever::new(SearchConfig {
        top_k: 5,
        ..Default::default()
    });
    let chunks: Vec<Chunk> = (0..8)
        .map(|i| chunk(&format!("c{}", i), "x", one_hot(i)))
        .collect();

    assert_eq!(retriever.retrieve("x", &chunks).snippets.len(), 5);
}

#[test]
fn seeded_notes_answer_flutter_question() {
    let embedder = QueryEmbedder::default();
    let notes = [
        ("c1", "XDesktopAgent is a local-first AI desktop agent with dataflow and FP principles."),
        ("c2", "Flutter desktop uses Dart FFI to call Go shared libraries for fast local processing."),
        ("c3", "The RAG pipeline retrieves local notes and emails and assembles a prompt for LLM."),
    ];
    let source = InMemoryChunkSource::new(
        notes
            .iter()
            .map(|(id, text)| chunk(id, text, quantize(&embedder.embed(text))))
            .collect(),
    );

    let answer = Retriever::default()
        .ask("How does Flutter call Go via Dart FFI?", &source)
        .unwrap();

    assert_eq!(answer.snippets.len(), 3);
    assert_eq!(answer.snippets[0].id, "c2");
}
