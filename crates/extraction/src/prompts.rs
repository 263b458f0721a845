//! Prompt templates for abbreviation extraction
//!
//! The instruction text is static; the user prompt embeds the excerpt and the
//! few-shot examples selected by [`FewShotType`].

use crate::provider::ChatMessage;
use lawabbr_core::FewShotType;

pub const SYSTEM_INSTRUCTION: &str = include_str!("../assets/prompts/system.txt");

pub const USER_TEMPLATE: &str = include_str!("../assets/prompts/user.txt");

// Three basic definition patterns
pub const FEW_SHOT_BASELINE: &str = include_str!("../assets/prompts/few_shot_baseline.txt");

// Abbreviation defined by reference to another provision
pub const FEW_SHOT_NESTED: &str = include_str!("../assets/prompts/few_shot_nested.txt");

pub fn format_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Worked examples for the given variant
pub fn few_shot_examples(few_shot: FewShotType) -> String {
    match few_shot {
        FewShotType::None => String::new(),
        FewShotType::Nakamura => FEW_SHOT_BASELINE.to_string(),
        FewShotType::Our => format!("{FEW_SHOT_BASELINE}\n{FEW_SHOT_NESTED}"),
    }
}

/// User prompt for one excerpt
pub fn build_user_prompt(law_text: &str, few_shot: FewShotType) -> String {
    let examples = few_shot_examples(few_shot);
    // Examples first so that a placeholder inside the excerpt is never expanded
    let with_examples = format_prompt(USER_TEMPLATE, &[("few_shot", examples.as_str())]);
    format_prompt(&with_examples, &[("law_text", law_text)])
}

/// Messages for one request.
///
/// Without a system-role channel the instruction and the user prompt are
/// merged into a single user message.
pub fn build_messages(
    law_text: &str,
    few_shot: FewShotType,
    system_role: bool,
) -> Vec<ChatMessage> {
    let system = SYSTEM_INSTRUCTION.trim();
    let user = build_user_prompt(law_text, few_shot);
    if system_role {
        vec![ChatMessage::system(system), ChatMessage::user(user)]
    } else {
        vec![ChatMessage::user(format!("{system}\n{user}"))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Role;

    #[test]
    fn test_format_prompt() {
        let template = "Hello {name}, you are {age} years old.";
        let vars = [("name", "Alice"), ("age", "30")];
        let result = format_prompt(template, &vars);
        assert_eq!(result, "Hello Alice, you are 30 years old.");
    }

    #[test]
    #[allow(clippy::len_zero)]
    fn test_prompts_load() {
        assert!(SYSTEM_INSTRUCTION.len() > 0);
        assert!(USER_TEMPLATE.contains("{law_text}"));
        assert!(USER_TEMPLATE.contains("{few_shot}"));
    }

    #[test]
    fn test_user_prompt_embeds_text() {
        let prompt = build_user_prompt("第一条　この法律は", FewShotType::None);
        assert!(prompt.contains("第一条　この法律は"));
        assert!(!prompt.contains("{law_text}"));
        assert!(!prompt.contains("{few_shot}"));
        assert!(!prompt.contains("【サンプル1】"));
    }

    #[test]
    fn test_nakamura_has_baseline_only() {
        let prompt = build_user_prompt("text", FewShotType::Nakamura);
        assert!(prompt.contains("【サンプル1】"));
        assert!(prompt.contains("【サンプル3】"));
        assert!(!prompt.contains("【サンプル4】"));
    }

    #[test]
    fn test_our_extends_baseline() {
        let prompt = build_user_prompt("text", FewShotType::Our);
        assert!(prompt.contains(FEW_SHOT_BASELINE));
        assert!(prompt.contains("【サンプル4】"));
        assert!(prompt.contains("△△に規定する〇〇"));
    }

    #[test]
    fn test_placeholder_in_text_is_not_expanded() {
        let prompt = build_user_prompt("{few_shot}", FewShotType::Our);
        assert!(prompt.contains("---\n{few_shot}\n---"));
    }

    #[test]
    fn test_build_messages_with_system_role() {
        let messages = build_messages("text", FewShotType::None, true);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION.trim());
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_build_messages_merged_without_system_role() {
        let messages = build_messages("text", FewShotType::None, false);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0]
            .content
            .starts_with(SYSTEM_INSTRUCTION.trim()));
        assert!(messages[0].content.contains("【本番入力】"));
    }
}
