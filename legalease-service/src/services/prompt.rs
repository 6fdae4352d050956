//! Prompt assembly for the generation provider.
//!
//! Every function here is pure: the same inputs always produce the same bytes.

use crate::models::Turn;

/// Most recent turns carried into a chat prompt as context.
pub const HISTORY_WINDOW: usize = 6;

const ANALYST_INSTRUCTIONS: &str = r#"You are LegalEase, an expert legal document analysis and compliance advisory AI assistant. Your role is to help users understand legal documents and compliance requirements in clear, layman-friendly language.

LEGAL EXPERTISE AREAS:
- Contract Law (NDAs, service agreements, employment contracts)
- Employment Law (hiring, termination, workplace policies)
- Intellectual Property (patents, trademarks, copyrights, trade secrets)
- Corporate Law (business formation, governance, mergers)
- Privacy & Data Protection (GDPR, CCPA, privacy policies)
- Compliance (regulatory requirements, industry standards)
- Real Estate Law (leases, property transactions)
- Litigation (disputes, settlements, court procedures)

Your responses should be structured and include the following sections when analyzing legal content:

1. **CATEGORY TAG**: Identify the primary legal category (Contract Law, Employment, IP, Compliance, etc.)

2. **SIMPLE EXPLANATION**: Provide a clear, jargon-free explanation of the legal content or question (2-3 paragraphs).

3. **KEY POINTS**:
   - **Obligations**: What the user must do or comply with
   - **Rights**: What rights or protections the user has
   - **Deadlines**: Any time-sensitive requirements or dates mentioned
   - **Risks**: Potential issues or concerns to be aware of

4. **RISK ASSESSMENT**: Provide a risk score (Low / Medium / High) with a brief justification.

5. **LEGAL TERMINOLOGY**: If complex legal terms are used, provide brief definitions in plain language.

6. **CITATION FORMAT**: If referencing specific laws, statutes, or regulations, format citations appropriately (e.g., "Title 15 U.S.C. § 45" or "Cal. Civ. Code § 1542").

7. **RECOMMENDED NEXT STEPS**: Actionable advice on what the user should consider doing next (2-3 specific recommendations).

8. **RELATED RESOURCES**: Suggest relevant legal resources, templates, or further reading when applicable.

IMPORTANT GUIDELINES:
- Use simple, accessible language. Avoid legal jargon when possible, or explain it clearly when necessary.
- Be accurate but conversational. Help users feel informed, not intimidated.
- Focus on practical implications and actionable insights.
- If the input is a question rather than document analysis, adapt the format accordingly.
- Always maintain professional tone while being approachable.
- Do NOT provide definitive legal advice - frame suggestions as "you may want to consider" or "it would be wise to consult about"
- When appropriate, reference applicable statutes, regulations, or case law (with proper citations)
- Identify potential compliance issues and regulatory considerations

Now, analyze the following legal content or question:"#;

const CLOSING_INSTRUCTION: &str = "Please provide your analysis in the structured format above.";

/// Build the chat prompt for `user_input` given the prior conversation.
///
/// Only the last [`HISTORY_WINDOW`] turns of `history` are included, oldest first.
pub fn build_prompt(user_input: &str, history: &[Turn]) -> String {
    let mut prompt = String::from(ANALYST_INSTRUCTIONS);

    if !history.is_empty() {
        prompt.push_str("\n\nPrevious conversation context:\n");
        for turn in windowed(history) {
            prompt.push_str(turn.role.label());
            prompt.push_str(": ");
            prompt.push_str(&turn.content);
            prompt.push('\n');
        }
    }

    prompt.push_str("\n\nUser Input:\n");
    prompt.push_str(user_input);
    prompt.push_str("\n\n");
    prompt.push_str(CLOSING_INSTRUCTION);

    prompt
}

/// The tail of `history` that fits in the context window.
pub fn windowed(history: &[Turn]) -> &[Turn] {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    &history[start..]
}

/// One-shot prompt asking for a formatted legal citation.
pub fn citation_prompt(citation: &str) -> String {
    format!(
        r#"Format the following legal citation in proper Bluebook or standard legal citation format:

"{citation}"

Provide:
1. Formatted citation in proper legal style
2. Citation type (Case, Statute, Regulation, etc.)
3. Jurisdiction (if applicable)
4. Brief explanation of the source

Format your response as JSON with keys: formatted_citation, citation_type, jurisdiction, explanation"#
    )
}

/// One-shot prompt asking which legal category a text belongs to.
pub fn category_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following legal text/question and identify the primary legal category:

"{text}"

Categories: Contract Law, Employment Law, Intellectual Property, Compliance, Corporate Law, Privacy & Data, Real Estate, Litigation, or Other.

Respond with only the category name and a brief 1-sentence explanation."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(len: usize) -> Vec<Turn> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("question {}", i), false)
                } else {
                    Turn::assistant(format!("answer {}", i))
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_history_has_no_context_block() {
        let prompt = build_prompt("What is an NDA?", &[]);

        assert!(prompt.starts_with(ANALYST_INSTRUCTIONS));
        assert!(!prompt.contains("Previous conversation context:"));
        assert!(prompt.ends_with(
            "\n\nUser Input:\nWhat is an NDA?\n\nPlease provide your analysis in the structured format above."
        ));
    }

    #[test]
    fn test_instruction_block_names_required_sections() {
        let prompt = build_prompt("x", &[]);
        for section in [
            "CATEGORY TAG",
            "SIMPLE EXPLANATION",
            "Obligations",
            "Rights",
            "Deadlines",
            "Risks",
            "Low / Medium / High",
            "LEGAL TERMINOLOGY",
            "CITATION FORMAT",
            "RECOMMENDED NEXT STEPS",
            "RELATED RESOURCES",
        ] {
            assert!(prompt.contains(section), "missing section {}", section);
        }
    }

    #[test]
    fn test_instruction_block_wording() {
        let prompt = build_prompt("x", &[]);
        for phrase in [
            "Your responses should be structured and include the following sections when analyzing legal content:",
            "1. **CATEGORY TAG**: Identify the primary legal category",
            "4. **RISK ASSESSMENT**: Provide a risk score (Low / Medium / High) with a brief justification.",
            "(e.g., \"Title 15 U.S.C. § 45\" or \"Cal. Civ. Code § 1542\")",
            "- Always maintain professional tone while being approachable.",
            "- Identify potential compliance issues and regulatory considerations\n",
        ] {
            assert!(prompt.contains(phrase), "missing {:?}", phrase);
        }
    }

    #[test]
    fn test_context_block_renders_roles_in_order() {
        let history = vec![
            Turn::user("What is an NDA?", false),
            Turn::assistant("An NDA is..."),
        ];

        let prompt = build_prompt("Can I sign one without a lawyer?", &history);

        let instructions = prompt.find("Now, analyze the following").unwrap();
        let context = prompt
            .find("Previous conversation context:\nUser: What is an NDA?\nAssistant: An NDA is...\n")
            .unwrap();
        let input = prompt
            .find("User Input:\nCan I sign one without a lawyer?")
            .unwrap();
        let closing = prompt.find(CLOSING_INSTRUCTION).unwrap();

        assert!(instructions < context);
        assert!(context < input);
        assert!(input < closing);
    }

    #[test]
    fn test_only_last_six_turns_are_included() {
        let history = conversation(9);
        let prompt = build_prompt("next", &history);

        for dropped in ["question 0\n", "answer 1\n", "question 2\n"] {
            assert!(!prompt.contains(dropped), "{:?} leaked into prompt", dropped);
        }

        let positions: Vec<usize> = (3..9)
            .map(|i| {
                let label = if i % 2 == 0 { "User: question" } else { "Assistant: answer" };
                prompt
                    .find(&format!("{} {}\n", label, i))
                    .unwrap_or_else(|| panic!("turn {} missing", i))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_window_never_exceeds_limit() {
        for len in 0..12 {
            let history = conversation(len);
            let window = windowed(&history);
            assert_eq!(window.len(), len.min(HISTORY_WINDOW));
            if let Some(last) = window.last() {
                assert_eq!(last, history.last().unwrap());
            }
        }
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let history = conversation(7);
        let a = build_prompt("Is this clause enforceable?", &history);
        let b = build_prompt("Is this clause enforceable?", &history);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_empty_input_still_produces_prompt() {
        let prompt = build_prompt("", &[]);
        assert!(prompt.contains("User Input:\n\n\n"));
    }

    #[test]
    fn test_citation_prompt_quotes_input() {
        let prompt = citation_prompt("15 usc 45");
        assert!(prompt.contains("\"15 usc 45\""));
        assert!(prompt.contains("formatted_citation"));
    }

    #[test]
    fn test_category_prompt_lists_categories() {
        let prompt = category_prompt("My landlord kept my deposit");
        assert!(prompt.contains("\"My landlord kept my deposit\""));
        assert!(prompt.contains("Real Estate"));
        assert!(prompt.contains("Other"));
    }
}
