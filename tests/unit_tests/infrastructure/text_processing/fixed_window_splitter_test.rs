use mediscan::application::ports::TextSplitter;
use mediscan::infrastructure::text_processing::FixedWindowSplitter;

#[test]
fn given_text_of_7000_chars_when_splitting_by_3000_then_yields_three_windows() {
    let splitter = FixedWindowSplitter::new(3000);
    let text = "m".repeat(7000);

    let chunks = splitter.split(&text);

    let lengths: Vec<usize> = chunks.iter().map(|c| c.char_len()).collect();
    assert_eq!(lengths, vec![3000, 3000, 1000]);
    let offsets: Vec<usize> = chunks.iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![0, 3000, 6000]);
}

#[test]
fn given_exact_multiple_when_splitting_then_has_no_trailing_empty_chunk() {
    let splitter = FixedWindowSplitter::new(4);

    let chunks = splitter.split("abcdefgh");

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].text, "efgh");
}

#[test]
fn given_empty_text_when_splitting_then_yields_nothing() {
    let splitter = FixedWindowSplitter::new(3000);
    assert!(splitter.split("").is_empty());
}

#[test]
fn given_multibyte_text_when_splitting_then_concatenation_restores_input() {
    let splitter = FixedWindowSplitter::new(3);
    let text = "µg/dL → 5 mmol/L ✓";

    let chunks = splitter.split(text);

    let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(rebuilt, text);
    assert!(chunks.iter().all(|c| c.char_len() <= 3));
    let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
    assert_eq!(indices, (0..chunks.len()).collect::<Vec<_>>());
}

#[test]
fn given_zero_window_when_constructing_then_clamps_to_one() {
    let splitter = FixedWindowSplitter::new(0);

    assert_eq!(splitter.window_chars(), 1);
    assert_eq!(splitter.split("ab").len(), 2);
}
