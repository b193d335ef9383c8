//! Prompts sent to the generator.

use super::QuestionRequest;

/// Build the prompt asking for one question in the five-segment format.
pub fn build_question_prompt(request: &QuestionRequest) -> String {
    let exclude = if request.exclude.is_empty() {
        "(none yet)".to_string()
    } else {
        request
            .exclude
            .iter()
            .map(|q| format!("- {q}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are a boss specialised in {topic}.

Rules:
- Ask ONE question.
- Provide EXACTLY 4 answers.
- No commas in the question or the answers.
- End answers with :correct or :wrong.
- Output exactly 5 comma-separated items and nothing else.
- The correct answer must be in position {position}.

<Format>
'boss_question','a:correct','b:wrong','c:wrong','d:wrong'
</Format>

<Examples>
Answer in position 1 -> 'What is the acceleration due to gravity on Earth?','9.8 m/s^2:correct','10 m/s^2:wrong','5 m/s^2:wrong','12 m/s^2:wrong'
Answer in position 2 -> 'What is the capital of France?','London:wrong','Paris:correct','Berlin:wrong','Madrid:wrong'
Answer in position 3 -> 'What is the largest planet in our solar system?','Venus:wrong','Mars:wrong','Jupiter:correct','Saturn:wrong'
Answer in position 4 -> 'Who painted the Mona Lisa?','Michelangelo:wrong','Pablo Picasso:wrong','Vincent van Gogh:wrong','Leonardo da Vinci:correct'
</Examples>

Do not ask any of these questions again:
{exclude}
"#,
        topic = request.topic,
        position = request.desired_position,
    )
}

/// Build the prompt asking for a boss name.
pub fn build_boss_name_prompt(topic: &str) -> String {
    format!(
        "Generate a spooky evil name for 'The Boss of {topic}'.\n\
         Reply with only the name. It must be a reference to the topic - {topic}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_prompt_includes_request_details() {
        let request = QuestionRequest {
            topic: "Geography".to_string(),
            exclude: vec!["What is the capital of Peru?".to_string()],
            desired_position: 2,
        };
        let prompt = build_question_prompt(&request);

        assert!(prompt.contains("specialised in Geography"));
        assert!(prompt.contains("must be in position 2"));
        assert!(prompt.contains("- What is the capital of Peru?"));
    }

    #[test]
    fn test_question_prompt_without_history() {
        let request = QuestionRequest {
            topic: "Geography".to_string(),
            exclude: Vec::new(),
            desired_position: 4,
        };
        assert!(build_question_prompt(&request).contains("(none yet)"));
    }

    #[test]
    fn test_boss_name_prompt() {
        let prompt = build_boss_name_prompt("Jazz");
        assert!(prompt.contains("The Boss of Jazz"));
        assert!(prompt.contains("only the name"));
    }
}
