//! Psychometric question bank served to the quiz and used to resolve answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::assessment::traits::Trait;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionOption {
    pub text: String,
    #[serde(rename = "trait")]
    pub trait_: Trait,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    pub category: String,
    pub options: Vec<QuestionOption>,
}

/// Questions indexed by id. Order of `questions()` is the presentation order.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<u32, usize>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        let by_id = questions
            .iter()
            .enumerate()
            .map(|(idx, q)| (q.id, idx))
            .collect();
        Self { questions, by_id }
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.by_id.get(&id).map(|&idx| &self.questions[idx])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// The 15-question career quiz. Every option carries 5 points toward one trait.
    pub fn builtin() -> Self {
        use Trait::*;

        let q = |id: u32, prompt: &str, category: &str, options: [(&str, Trait); 4]| Question {
            id,
            prompt: prompt.to_string(),
            category: category.to_string(),
            options: options
                .into_iter()
                .map(|(text, t)| QuestionOption {
                    text: text.to_string(),
                    trait_: t,
                    score: 5,
                })
                .collect(),
        };

        Self::new(vec![
            q(1, "When solving a problem, you prefer to:", "analytical", [
                ("Break it into logical steps and analyze each part", Analytical),
                ("Look for creative, unconventional approaches", Creative),
                ("Discuss it with others and get different perspectives", Social),
                ("Jump right in and learn by doing", Realistic),
            ]),
            q(2, "In a group project, you naturally take the role of:", "work_style", [
                ("Leader: organizing tasks and directing the team", Enterprising),
                ("Researcher: gathering data and analyzing information", Analytical),
                ("Mediator: ensuring everyone is heard and aligned", Social),
                ("Executor: doing the hands-on work to get things done", Realistic),
            ]),
            q(3, "Which activity excites you the most?", "interests", [
                ("Building something with code or technology", Analytical),
                ("Designing visuals or creating art", Creative),
                ("Leading or starting a new initiative", Enterprising),
                ("Helping people solve their problems", Social),
            ]),
            q(4, "When you achieve a goal, what matters most to you?", "values", [
                ("Financial reward and stability", Conventional),
                ("Recognition and personal growth", Enterprising),
                ("Impact: knowing I made a difference", Social),
                ("The learning and skills I gained along the way", Analytical),
            ]),
            q(5, "Your ideal work environment would be:", "work_style", [
                ("A quiet office with focused deep work", Analytical),
                ("A vibrant, creative studio", Creative),
                ("A bustling startup with constant energy", Enterprising),
                ("A collaborative team-based setting", Social),
            ]),
            q(6, "Which school subject did you enjoy most?", "aptitude", [
                ("Mathematics or Computer Science", Analytical),
                ("Art, Music, or Literature", Creative),
                ("Economics or Business Studies", Enterprising),
                ("Biology or Social Sciences", Social),
            ]),
            q(7, "How do you prefer to learn something new?", "learning_style", [
                ("Read documentation/textbooks and understand concepts", Analytical),
                ("Watch videos and visual demonstrations", Creative),
                ("Hands-on practice and building projects", Realistic),
                ("Discuss with mentors or peers", Social),
            ]),
            q(8, "Which of these challenges appeals to you?", "interests", [
                ("Optimizing a system to be more efficient", Analytical),
                ("Designing an award-winning brand identity", Creative),
                ("Scaling a business from 0 to 1 million users", Enterprising),
                ("Teaching underprivileged kids new skills", Social),
            ]),
            q(9, "You're more comfortable with:", "personality", [
                ("Numbers, data, and spreadsheets", Conventional),
                ("Colors, shapes, and visual patterns", Creative),
                ("Words, persuasion, and negotiation", Enterprising),
                ("People, emotions, and relationships", Social),
            ]),
            q(10, "If money wasn't a concern, you would:", "passion", [
                ("Build technology that changes the world", Analytical),
                ("Create art, music, or films", Creative),
                ("Start a company and build something from scratch", Enterprising),
                ("Work in social causes or NGOs", Social),
            ]),
            q(11, "When making decisions, you rely more on:", "decision_style", [
                ("Logic, facts, and data analysis", Analytical),
                ("Intuition and gut feeling", Creative),
                ("Strategic thinking and risk-reward analysis", Enterprising),
                ("How it affects people around me", Social),
            ]),
            q(12, "What do you value most in a career?", "values", [
                ("High salary and financial growth", Conventional),
                ("Creative freedom and expression", Creative),
                ("Power, influence, and leadership opportunities", Enterprising),
                ("Work-life balance and meaningful impact", Social),
            ]),
            q(13, "Your friends would describe you as:", "personality", [
                ("The logical one who always thinks things through", Analytical),
                ("The creative one with wild ideas", Creative),
                ("The ambitious one always chasing goals", Enterprising),
                ("The caring one everyone goes to for advice", Social),
            ]),
            q(14, "Which weekend activity do you prefer?", "interests", [
                ("Coding a side project or learning tech", Analytical),
                ("Drawing, designing, or photography", Creative),
                ("Reading about business or side hustles", Enterprising),
                ("Volunteering or spending time with family", Social),
            ]),
            q(15, "When faced with ambiguity, you:", "adaptability", [
                ("Research and gather more data before acting", Analytical),
                ("Embrace it and see where creativity takes me", Creative),
                ("Make a quick decision and pivot if needed", Enterprising),
                ("Seek input from trusted people around me", Social),
            ]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_has_fifteen_questions_with_unique_ids() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 15);
        for q in bank.questions() {
            assert_eq!(bank.get(q.id), Some(q));
            assert_eq!(q.options.len(), 4);
        }
    }

    #[test]
    fn test_unknown_id_is_none() {
        assert!(QuestionBank::builtin().get(99).is_none());
    }

    #[test]
    fn test_option_serializes_trait_key() {
        let bank = QuestionBank::builtin();
        let json = serde_json::to_value(&bank.questions()[0]).unwrap();
        assert_eq!(json["options"][0]["trait"], "analytical");
        assert_eq!(json["question"], "When solving a problem, you prefer to:");
    }
}
