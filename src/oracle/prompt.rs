// Prompt construction for the semantic oracle

/// Build the single prompt sent to the oracle for one comparison
///
/// Both texts are cut to `excerpt_chars` characters.
pub fn build_prompt(text_a: &str, text_b: &str, excerpt_chars: usize) -> String {
    format!(
        r#"Analyze the similarity between these two texts and provide a comprehensive analysis.

Text 1: "{text_a}"

Text 2: "{text_b}"

Please provide:
1. A similarity score from 0.0 to 1.0 based on semantic meaning
2. Key insights about the relationship between the texts
3. What makes them similar or different
4. The main themes or topics in each text
5. A comparison of the writing styles
6. Three specific suggestions (under 50 words each) for making the texts more similar

Format your response as JSON with these fields:
{{
    "semantic_similarity": <float between 0.0 and 1.0>,
    "insights": "<string with analysis>",
    "themes_text1": ["<theme1>", "<theme2>"],
    "themes_text2": ["<theme1>", "<theme2>"],
    "key_differences": "<string>",
    "writing_style_comparison": "<string>",
    "suggestions": ["<suggestion1>", "<suggestion2>", "<suggestion3>"]
}}"#,
        text_a = excerpt(text_a, excerpt_chars),
        text_b = excerpt(text_b, excerpt_chars),
    )
}

/// First `max_chars` characters, with an ellipsis when something was cut
fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
