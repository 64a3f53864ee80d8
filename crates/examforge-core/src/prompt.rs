//! Prompt compilation for the generation provider.
//!
//! Renders a normalized [`GenerationConfig`] plus the extracted source text
//! into a single generation instruction. The output is deterministic: the
//! same config and source always produce byte-identical instructions, which
//! keeps provider behavior reproducible and the template testable.

use crate::config::GenerationConfig;
use crate::error::{CoreError, Result};

/// Compile a generation instruction from `config` and `source_text`.
///
/// # Errors
///
/// Returns [`CoreError::NoExtractableText`] when the source text is empty
/// after trimming — there is nothing to ground the generation in.
pub fn compile_prompt(config: &GenerationConfig, source_text: &str) -> Result<String> {
    let source = source_text.trim();
    if source.is_empty() {
        return Err(CoreError::NoExtractableText);
    }

    let count = config.target_question_count();
    let types = config.question_types.join(", ");
    let title = document_title(config);

    let mut prompt = String::new();

    prompt.push_str(&format!("You are an expert {} educator", config.subject));
    if let Some(level) = &config.level {
        prompt.push_str(&format!(" teaching {} students", level));
    }
    prompt.push_str(
        ". Based on the following educational content, generate comprehensive \
         questions with solutions.\n\n",
    );

    prompt.push_str("Content:\n");
    prompt.push_str(source);
    prompt.push_str("\n\n");

    prompt.push_str(&format!(
        "Please generate exactly {} high-quality {} questions based on this content.\n\n",
        count, config.subject
    ));

    prompt.push_str("Question Requirements:\n");
    prompt.push_str(&format!("- Question types: {}\n", types));
    prompt.push_str(&format!("- Difficulty level: {}\n", config.difficulty));
    prompt.push_str("- Each question should be clear and well-formatted\n");
    prompt.push_str("- Provide detailed step-by-step solutions\n");
    prompt.push_str("- Use proper LaTeX notation for all mathematical expressions\n");

    for (kind, requested) in &config.counts_by_type {
        if *requested > 0 {
            prompt.push_str(&format!("- Include exactly {} {} questions\n", requested, kind));
        }
    }
    for (marks, requested) in &config.counts_by_marks {
        if *requested > 0 {
            prompt.push_str(&format!(
                "- Include exactly {} questions worth {} marks each (state the marks with the question)\n",
                requested, marks
            ));
        }
    }

    if let Some(instructions) = &config.custom_instructions {
        prompt.push_str(&format!(
            "\nHighest-priority instructions from the educator (these override the \
             requirements above where they conflict):\n{}\n",
            instructions
        ));
    }

    prompt.push_str("\nFormat your response ENTIRELY in LaTeX using this structure:\n\n");
    prompt.push_str("\\documentclass{article}\n");
    prompt.push_str("\\usepackage{amsmath}\n");
    prompt.push_str("\\usepackage{amssymb}\n");
    prompt.push_str("\\usepackage{geometry}\n");
    prompt.push_str("\\geometry{margin=1in}\n\n");
    prompt.push_str(&format!("\\title{{{}}}\n", title));
    prompt.push_str("\\author{Examforge}\n");
    prompt.push_str("\\date{\\today}\n\n");
    prompt.push_str("\\begin{document}\n");
    prompt.push_str("\\maketitle\n\n");
    prompt.push_str("\\section*{Instructions}\n");
    prompt.push_str(&format!(
        "This document contains {} {} questions with detailed solutions. \
         Question types include: {}.\n\n",
        count, config.subject, types
    ));
    prompt.push_str("\\section*{Question 1}\n");
    prompt.push_str(&format!(
        "[Write a clear {} question here with proper $\\LaTeX$ math notation]\n\n",
        config.subject
    ));
    prompt.push_str("\\subsection*{Solution}\n");
    prompt.push_str(
        "[Provide a detailed step-by-step solution with explanations and $$equations$$]\n\n",
    );
    prompt.push_str(&format!(
        "[Continue the same Question/Solution pattern for all {} questions]\n\n",
        count
    ));
    prompt.push_str("\\end{document}\n");

    prompt.push_str("\nIMPORTANT:\n");
    prompt.push_str("- Use $...$ for inline math and $$...$$ or \\[...\\] for display math\n");
    prompt.push_str("- Make questions relevant to the provided content\n");
    prompt.push_str("- Ensure solutions are comprehensive and educational\n");
    prompt.push_str("- Use proper LaTeX formatting throughout\n");

    Ok(prompt)
}

/// Title line for the generated document, e.g.
/// `Physics Questions - Hard Difficulty`.
pub fn document_title(config: &GenerationConfig) -> String {
    format!(
        "{} Questions - {} Difficulty",
        capitalize(&config.subject),
        capitalize(config.difficulty.as_str())
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawGenerationConfig;

    fn physics_config() -> GenerationConfig {
        RawGenerationConfig {
            subject: Some("physics".to_string()),
            question_types: Some(vec!["conceptual".to_string()]),
            difficulty: Some("hard".to_string()),
            ..Default::default()
        }
        .normalize()
        .unwrap()
    }

    #[test]
    fn test_empty_source_rejected() {
        let config = GenerationConfig::default();
        assert!(matches!(
            compile_prompt(&config, "  \n "),
            Err(CoreError::NoExtractableText)
        ));
    }

    #[test]
    fn test_deterministic() {
        let config = physics_config();
        let a = compile_prompt(&config, "Newton's laws of motion.").unwrap();
        let b = compile_prompt(&config, "Newton's laws of motion.").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_embeds_subject_difficulty_and_title() {
        let config = physics_config();
        let prompt = compile_prompt(&config, "Newton's laws of motion.").unwrap();

        assert!(prompt.contains("expert physics educator"));
        assert!(prompt.contains("\\title{Physics Questions - Hard Difficulty}"));
        assert!(prompt.contains("- Difficulty level: hard"));
        assert!(prompt.contains("- Question types: conceptual"));
        assert!(prompt.contains("Newton's laws of motion."));
    }

    #[test]
    fn test_default_count_is_ten() {
        let config = GenerationConfig::default();
        let prompt = compile_prompt(&config, "text").unwrap();
        assert!(prompt.contains("exactly 10 high-quality"));
    }

    #[test]
    fn test_counts_drive_target_and_breakdown() {
        let config = RawGenerationConfig {
            counts_by_marks: Some([("2".to_string(), 3), ("5".to_string(), 2)].into()),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        let prompt = compile_prompt(&config, "text").unwrap();

        assert!(prompt.contains("exactly 5 high-quality"));
        assert!(prompt.contains("exactly 3 questions worth 2 marks"));
        assert!(prompt.contains("exactly 2 questions worth 5 marks"));
    }

    #[test]
    fn test_custom_instructions_marked_highest_priority() {
        let config = RawGenerationConfig {
            custom_instructions: Some("Focus on chapter 3 only".to_string()),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        let prompt = compile_prompt(&config, "text").unwrap();

        assert!(prompt.contains("Highest-priority instructions"));
        assert!(prompt.contains("Focus on chapter 3 only"));
    }

    #[test]
    fn test_level_embedded_in_persona() {
        let config = RawGenerationConfig {
            level: Some("undergraduate".to_string()),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        let prompt = compile_prompt(&config, "text").unwrap();
        assert!(prompt.contains("teaching undergraduate students"));
    }

    #[test]
    fn test_math_delimiters_instructed() {
        let config = GenerationConfig::default();
        let prompt = compile_prompt(&config, "text").unwrap();
        assert!(prompt.contains("$...$ for inline math"));
        assert!(prompt.contains("$$...$$ or \\[...\\] for display math"));
    }
}
