//! Builds the instruction prompt sent to the model.
//!
//! The template and the truncation limit are deliberately compile-time
//! constants, not configuration: the report structure is the product.

/// Maximum number of characters of extracted text embedded in a prompt.
/// Anything beyond this is dropped with a plain prefix cut.
pub const MAX_PROMPT_CHARS: usize = 120_000;

/// System preamble sent with every completion request.
pub const SYSTEM_PROMPT: &str =
    "You are a precise legal analyst. Output exactly the requested structure.";

const PROMPT_TEMPLATE: &str = r#"You are a legal analysis AI. You MUST follow the EXACT format below. DO NOT deviate from this structure.

STEP 1: Determine if the documents contain legal case materials (court cases, lawsuits, legal disputes, judgments, pleadings, legal briefs, court orders, legal contracts disputes, etc.)

STEP 2: If documents are NOT legal case materials (receipts, invoices, tickets, personal documents, etc.), write "Not legal case materials" in section 1 and "N/A" for ALL other sections.

STEP 3: If documents ARE legal case materials, analyze them and fill each section.

MANDATORY OUTPUT FORMAT - Copy these headings EXACTLY:

1. 25 Word Summary of the Case including Category of Law
[If not legal case materials, write: "Not legal case materials"]
[If legal case materials, write EXACTLY 25 words summarizing the case and legal category]

2. Name of Plaintiff & Defendant including respective Attorneys representing them
Plaintiff: [Name or N/A] | Attorney: [Name or N/A]
Defendant: [Name or N/A] | Attorney: [Name or N/A]

3. Case Story (Within 500 Words)
[Narrative description of the legal dispute or "N/A"]

4. Key Facts of the Case
- [Fact 1 or N/A]
- [Fact 2 or N/A]
- [Additional facts as bullet points or just - N/A]

5. Claims Made by Plaintiff including evidences/Documents
- [Claim 1 with evidence or N/A]
- [Claim 2 with evidence or N/A]
- [Additional claims as bullet points or just - N/A]

6. Claims Made by Defendant including evidences/Documents
- [Claim 1 with evidence or N/A]
- [Claim 2 with evidence or N/A]
- [Additional claims as bullet points or just - N/A]

7. List of Act, Section, Law and why it is applicable
- [Act/Section - Reason or N/A]
- [Additional acts as bullet points or just - N/A]

8. Procedural History (If Any)
[Chronological procedural events or "N/A"]

9. Comprehensive List of Dates/Chronology of Events
- [DD MMM YYYY - Event description or N/A]
- [Additional dates as bullet points or just - N/A]

CRITICAL RULES:
- Use ONLY the 9 numbered sections above
- Keep the exact heading text
- If not legal case materials, section 1 = "Not legal case materials", all others = "N/A"
- Do NOT add introduction paragraphs
- Do NOT add conclusion paragraphs
- Do NOT add additional sections
- Do NOT change the numbering
- Start immediately with "1. 25 Word Summary..."
- End immediately after section 9
- Write "N/A" when information is missing

Documents to analyze:
"#;

/// Embed the extracted text into the fixed instruction template, truncating
/// to [`MAX_PROMPT_CHARS`] first. Never fails, including for empty input.
pub fn build_prompt(extracted_text: &str) -> String {
    let embedded = truncate_chars(extracted_text, MAX_PROMPT_CHARS);
    format!("{PROMPT_TEMPLATE}\n{embedded}")
}

/// Prefix cut on a char boundary, not a byte offset. No attempt is made to
/// end at a word or sentence boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_embedded_unmodified() {
        let prompt = build_prompt("Plaintiff vs Defendant");
        assert!(prompt.ends_with("\nPlaintiff vs Defendant"));
    }

    #[test]
    fn long_text_is_cut_to_exactly_the_limit() {
        let text = "a".repeat(MAX_PROMPT_CHARS + 5_000);
        let prompt = build_prompt(&text);

        let embedded = prompt.rsplit_once('\n').unwrap().1;
        assert_eq!(embedded.chars().count(), MAX_PROMPT_CHARS);
        assert_eq!(embedded, &text[..MAX_PROMPT_CHARS]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(MAX_PROMPT_CHARS + 10);
        let prompt = build_prompt(&text);

        let embedded = prompt.rsplit_once('\n').unwrap().1;
        assert_eq!(embedded.chars().count(), MAX_PROMPT_CHARS);
    }

    #[test]
    fn empty_input_still_produces_the_template() {
        let prompt = build_prompt("");
        assert!(prompt.contains("1. 25 Word Summary of the Case including Category of Law"));
        assert!(prompt.contains("9. Comprehensive List of Dates/Chronology of Events"));
    }
}
