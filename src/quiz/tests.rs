use super::*;

struct QuizBuilder {
    quiz: Quiz,
}

impl QuizBuilder {
    fn new() -> Self {
        QuizBuilder {
            quiz: Quiz::new("example quiz"),
        }
    }

    fn multiple_choice(mut self, correct_index: i64) -> Self {
        let options = ["red", "green", "blue", "yellow"]
            .iter()
            .map(|o| o.to_string())
            .collect();
        let question = Question::multiple_choice("Pick a color", options, correct_index).unwrap();
        self.quiz.add_question(question);
        self
    }

    fn true_false(mut self, correct_answer: bool) -> Self {
        self.quiz
            .add_question(Question::true_false("Is it true?", correct_answer));
        self
    }

    fn open_ended(mut self, answer: &str) -> Self {
        let question = Question::open_ended("Name it", vec![answer]).unwrap();
        self.quiz.add_question(question);
        self
    }

    fn build(self) -> Quiz {
        self.quiz
    }
}

#[test]
fn starts_empty() {
    let quiz = Quiz::new("empty");
    assert_eq!(quiz.name(), "empty");
    assert_eq!(quiz.total_questions(), 0);
    assert_eq!(quiz.score(), 0);
}

#[test]
fn serves_questions_in_insertion_order() {
    let mut quiz = QuizBuilder::new()
        .multiple_choice(0)
        .true_false(true)
        .open_ended("rust")
        .build();
    quiz.start_session();

    let kinds: Vec<(usize, QuestionKind)> = (0..3)
        .filter_map(|_| quiz.next_question().map(|(i, q)| (i, q.kind())))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (0, QuestionKind::MultipleChoice),
            (1, QuestionKind::TrueFalse),
            (2, QuestionKind::OpenEnded),
        ]
    );
}

#[test]
fn keeps_returning_end_marker_once_exhausted() {
    let mut quiz = QuizBuilder::new().true_false(true).true_false(false).build();
    quiz.start_session();
    assert!(quiz.next_question().is_some());
    assert!(quiz.next_question().is_some());
    for _ in 0..5 {
        assert!(quiz.next_question().is_none());
    }
}

#[test]
fn serves_from_start_without_explicit_session() {
    let mut quiz = QuizBuilder::new().true_false(true).build();
    assert_eq!(quiz.next_question().map(|(i, _)| i), Some(0));
}

#[test]
fn empty_quiz_is_immediately_exhausted() {
    let mut quiz = Quiz::new("empty");
    quiz.start_session();
    assert!(quiz.next_question().is_none());
}

#[test]
fn start_session_rewinds_and_resets_score() {
    let mut quiz = QuizBuilder::new().true_false(true).true_false(false).build();
    quiz.start_session();
    quiz.next_question();
    quiz.next_question();
    quiz.next_question();
    quiz.increment_score();
    assert_eq!(quiz.score(), 1);

    quiz.start_session();
    assert_eq!(quiz.score(), 0);
    assert_eq!(quiz.next_question().map(|(i, _)| i), Some(0));
}

#[test]
fn question_lookup_ignores_cursor() {
    let mut quiz = QuizBuilder::new().multiple_choice(1).true_false(true).build();
    let expected = quiz.question_at(1).cloned();
    assert!(expected.is_some());
    for _ in 0..4 {
        assert_eq!(quiz.question_at(1).cloned(), expected);
        quiz.next_question();
    }
    assert!(quiz.question_at(2).is_none());
}

#[test]
fn tracks_score_across_a_playthrough() {
    let mut quiz = QuizBuilder::new().multiple_choice(1).true_false(true).build();
    quiz.start_session();

    let (index, question) = quiz.next_question().unwrap();
    assert_eq!(index, 0);
    let is_correct = question.is_correct("2");
    assert!(is_correct);
    quiz.increment_score();

    let (index, _) = quiz.next_question().unwrap();
    let is_correct = quiz.question_at(index).unwrap().is_correct("false");
    assert!(!is_correct);

    assert!(quiz.next_question().is_none());
    assert_eq!(quiz.score(), 1);
    assert_eq!(quiz.total_questions(), 2);
}
