//! Multiple-choice quiz. Numeric questions take their answers from the
//! kinematics functions so the quiz can never disagree with the screens.

use crate::error::{RelvizError, Result};
use crate::relativity::{length_contraction, lorentz_factor, observed_wavelength};

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

impl Question {
    fn conceptual(prompt: &str, options: [&str; 4], correct: usize, explanation: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
            explanation: explanation.to_string(),
        }
    }

    /// Mixes the right answer with three distractors, shown in ascending order.
    fn numeric(prompt: String, answer: f64, distractors: [f64; 3], unit: &str, explanation: String) -> Self {
        let mut candidates = vec![answer];
        candidates.extend(distractors);
        candidates.sort_by(f64::total_cmp);
        let correct = candidates
            .iter()
            .position(|c| within_tolerance(answer, *c, 1e-12))
            .unwrap_or(0);
        Self {
            prompt,
            options: candidates.iter().map(|c| format!("{c:.3}{unit}")).collect(),
            correct,
            explanation,
        }
    }
}

/// True when `answer` is within `rel_tol` of `expected`, relative to `expected`.
pub fn within_tolerance(expected: f64, answer: f64, rel_tol: f64) -> bool {
    if !answer.is_finite() {
        return false;
    }
    (expected - answer).abs() <= rel_tol * expected.abs().max(f64::EPSILON)
}

pub fn conceptual_questions() -> Vec<Question> {
    vec![
        Question::conceptual(
            "By the second postulate of special relativity, the speed of light in vacuum is:",
            [
                "Faster when the source moves towards you",
                "Slower when the source moves away",
                "The same for every inertial observer",
                "Set by the gravity of nearby stars",
            ],
            2,
            "c is a universal constant: every inertial observer measures the same value.",
        ),
        Question::conceptual(
            "Why does the travelling twin come home younger?",
            [
                "Biology runs differently in space",
                "The traveller turns around and changes inertial frames",
                "The Earth twin sits deeper in the Sun's gravity",
                "Dilation only affects mechanical clocks",
            ],
            1,
            "Velocity is relative but the turnaround is not: only the traveller switches frames.",
        ),
        Question::conceptual(
            "What happens to an object's length as it approaches light speed?",
            [
                "It expands in every direction",
                "It contracts along the direction of motion only",
                "It contracts in every direction",
                "Nothing",
            ],
            1,
            "Length contraction only acts along the axis of travel.",
        ),
        Question::conceptual(
            "Why does the tunnel observer think the train fits inside?",
            [
                "The tunnel grows",
                "The moving train is length-contracted",
                "The driver brakes in time",
                "It is an optical illusion",
            ],
            1,
            "In the tunnel frame the train moves, so the train is the one that contracts.",
        ),
        Question::conceptual(
            "Two events are simultaneous in one frame. For an observer moving relative to it they are:",
            [
                "Always simultaneous",
                "Never simultaneous",
                "Not necessarily simultaneous",
                "Reversed in time",
            ],
            2,
            "Observers in relative motion disagree about the timing of separated events.",
        ),
        Question::conceptual(
            "As a massive object approaches c, the energy needed to speed it up further:",
            ["Drops to zero", "Stays constant", "Grows without bound", "Fluctuates"],
            2,
            "γ diverges as v approaches c, so reaching c would take infinite energy.",
        ),
    ]
}

/// Questions computed from the kinematics layer.
pub fn numeric_questions() -> Result<Vec<Question>> {
    let gamma = lorentz_factor(0.6)?;
    let blue = observed_wavelength(550.0, 0.5)?;
    let contracted = length_contraction(100.0, 0.8)?;

    Ok(vec![
        Question::numeric(
            "What is the Lorentz factor γ at 0.6c?".to_string(),
            gamma,
            [0.8, 1.6, 2.5],
            "",
            format!("γ = 1 / sqrt(1 - 0.36) = 1 / 0.8 = {gamma:.3}"),
        ),
        Question::numeric(
            "A star emits 550 nm light. What wavelength do you see approaching it at 0.5c?".to_string(),
            blue,
            [550.0, 412.5, 952.628],
            " nm",
            format!("λ = 550 · sqrt(0.5 / 1.5) ≈ {blue:.1} nm: a blueshift."),
        ),
        Question::numeric(
            "A 100 m ship flies past at 0.8c. How long does it look?".to_string(),
            contracted,
            [100.0, 80.0, 166.667],
            " m",
            format!("L = 100 / γ = 100 · 0.6 = {contracted:.1} m"),
        ),
    ])
}

pub fn full_quiz() -> Result<Vec<Question>> {
    let mut questions = conceptual_questions();
    questions.extend(numeric_questions()?);
    Ok(questions)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Cadet,
    Student,
    Physicist,
    Professor,
    TimeLord,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 100.0 => Grade::TimeLord,
            p if p >= 80.0 => Grade::Professor,
            p if p >= 60.0 => Grade::Physicist,
            p if p >= 40.0 => Grade::Student,
            _ => Grade::Cadet,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Grade::Cadet => "Cadet",
            Grade::Student => "Student",
            Grade::Physicist => "Physicist",
            Grade::Professor => "Professor",
            Grade::TimeLord => "Time Lord",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub correct: bool,
    pub correct_option: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub grade: Grade,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    score: usize,
    answered: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(RelvizError::Quiz("a quiz needs at least one question".into()));
        }
        Ok(Self { questions, index: 0, score: 0, answered: false })
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.questions.len())
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    pub fn answer(&mut self, option: usize) -> Result<Outcome> {
        let question = self
            .questions
            .get(self.index)
            .ok_or_else(|| RelvizError::Quiz("the quiz is already finished".into()))?;
        if self.answered {
            return Err(RelvizError::Quiz("this question was already answered".into()));
        }
        if option >= question.options.len() {
            return Err(RelvizError::Quiz(format!(
                "option {} does not exist (choose 1-{})",
                option + 1,
                question.options.len()
            )));
        }
        self.answered = true;
        let correct = option == question.correct;
        if correct {
            self.score += 1;
        }
        tracing::debug!(question = self.index, option, correct, "quiz answer");
        Ok(Outcome {
            correct,
            correct_option: question.correct,
            explanation: question.explanation.clone(),
        })
    }

    /// Moves to the next question. Returns false once the quiz is over.
    pub fn advance(&mut self) -> Result<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        if !self.answered {
            return Err(RelvizError::Quiz("answer the current question first".into()));
        }
        self.index += 1;
        self.answered = false;
        Ok(!self.is_finished())
    }

    pub fn result(&self) -> QuizResult {
        let total = self.questions.len();
        let percentage = self.score as f64 / total as f64 * 100.0;
        QuizResult {
            score: self.score,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
        }
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.score = 0;
        self.answered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_answers_come_from_kinematics() {
        let questions = numeric_questions().unwrap();
        let gamma = &questions[0];
        assert_eq!(gamma.options[gamma.correct], "1.250");
        let ship = &questions[2];
        assert_eq!(ship.options[ship.correct], "60.000 m");
    }

    #[test]
    fn test_perfect_run() {
        let questions = full_quiz().unwrap();
        let answers: Vec<usize> = questions.iter().map(|q| q.correct).collect();
        let mut session = QuizSession::new(questions).unwrap();
        for answer in answers {
            assert!(session.answer(answer).unwrap().correct);
            session.advance().unwrap();
        }
        assert!(session.is_finished());
        let result = session.result();
        assert_eq!(result.score, result.total);
        assert_eq!(result.grade, Grade::TimeLord);
    }

    #[test]
    fn test_session_guards() {
        let mut session = QuizSession::new(conceptual_questions()).unwrap();
        assert!(session.advance().is_err());
        assert!(session.answer(9).is_err());
        let outcome = session.answer(0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_option, 2);
        assert!(session.answer(2).is_err());
        assert_eq!(session.score(), 0);

        session.restart();
        assert_eq!(session.position(), (1, 6));
        assert!(QuizSession::new(Vec::new()).is_err());
    }

    #[test]
    fn test_grades() {
        assert_eq!(Grade::from_percentage(0.0), Grade::Cadet);
        assert_eq!(Grade::from_percentage(40.0), Grade::Student);
        assert_eq!(Grade::from_percentage(66.7), Grade::Physicist);
        assert_eq!(Grade::from_percentage(80.0).title(), "Professor");
    }

    #[test]
    fn test_tolerance() {
        assert!(within_tolerance(1.25, 1.249, 0.01));
        assert!(!within_tolerance(1.25, 1.3, 0.01));
        assert!(!within_tolerance(1.25, f64::NAN, 0.01));
        assert!(within_tolerance(0.0, 0.0, 0.01));
    }
}
