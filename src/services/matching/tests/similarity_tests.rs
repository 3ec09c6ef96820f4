use super::*;

fn answer(answer_type: Option<AnswerType>) -> Answer {
    Answer {
        question_id: "q1".into(),
        category: Some(Category::Lifestyle),
        weight: 1.0,
        answer_type,
        value: None,
        text: None,
        selections: Vec::new(),
    }
}

fn scale(value: Option<f64>) -> Answer {
    Answer {
        value,
        ..answer(Some(AnswerType::Scale))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_identical_values_are_fully_similar() {
    assert_eq!(gaussian_similarity(4.0, 4.0, GAUSSIAN_SIGMA), 1.0);
    assert_eq!(inverse_distance(4.0, 4.0, LINEAR_RANGE), 1.0);
}

#[test]
fn test_gaussian_decays_with_distance() {
    let near = gaussian_similarity(3.0, 4.0, GAUSSIAN_SIGMA);
    let far = gaussian_similarity(1.0, 5.0, GAUSSIAN_SIGMA);
    assert!(near > far);
    // exp(-1 / 4.5)
    assert!((near - 0.800_737).abs() < 1e-6);
}

#[test]
fn test_inverse_distance_is_linear_and_floored() {
    assert!((inverse_distance(2.0, 5.0, LINEAR_RANGE) - 0.7).abs() < 1e-12);
    assert_eq!(inverse_distance(0.0, 25.0, LINEAR_RANGE), 0.0);
    assert_eq!(inverse_distance(1.0, 2.0, 0.0), NEUTRAL_SIMILARITY);
}

#[test]
fn test_jaccard_cases() {
    let ab = strings(&["hiking", "chess"]);
    assert_eq!(jaccard_similarity(&ab, &ab), 1.0);
    assert_eq!(jaccard_similarity(&ab, &strings(&["music"])), 0.0);
    assert_eq!(jaccard_similarity(&ab, &[]), 0.0);
    assert_eq!(jaccard_similarity(&[], &[]), 0.0);
    let partial = jaccard_similarity(&ab, &strings(&["chess", "music", "chess"]));
    assert!((partial - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_scale_kernel_depends_on_category() {
    let left = scale(Some(2.0));
    let right = scale(Some(4.0));

    let personality = answer_similarity(&left, &right, Category::Personality);
    let lifestyle = answer_similarity(&left, &right, Category::Lifestyle);

    assert!((personality - gaussian_similarity(2.0, 4.0, 1.5)).abs() < 1e-12);
    assert!((lifestyle - 0.8).abs() < 1e-12);
}

#[test]
fn test_missing_scale_value_is_neutral() {
    let sim = answer_similarity(&scale(Some(3.0)), &scale(None), Category::Values);
    assert_eq!(sim, NEUTRAL_SIMILARITY);
}

#[test]
fn test_multiple_choice_exact_match() {
    let pick = |text: &str| Answer {
        text: Some(text.into()),
        ..answer(Some(AnswerType::MultipleChoice))
    };
    assert_eq!(answer_similarity(&pick("cats"), &pick("cats"), Category::Lifestyle), 1.0);
    assert_eq!(answer_similarity(&pick("cats"), &pick("dogs"), Category::Lifestyle), 0.0);
}

#[test]
fn test_text_and_unknown_types_are_neutral() {
    let text = answer(Some(AnswerType::Text));
    let unknown = answer(None);
    assert_eq!(answer_similarity(&text, &text, Category::Interests), NEUTRAL_SIMILARITY);
    assert_eq!(answer_similarity(&unknown, &unknown, Category::Interests), NEUTRAL_SIMILARITY);
}

#[test]
fn test_dispatch_uses_first_answer_type() {
    let left = Answer {
        text: Some("yes".into()),
        ..answer(Some(AnswerType::MultipleChoice))
    };
    let right = Answer {
        text: Some("yes".into()),
        value: Some(1.0),
        ..answer(Some(AnswerType::Scale))
    };
    assert_eq!(answer_similarity(&left, &right, Category::Values), 1.0);
}

#[test]
fn test_parse_selection_list() {
    assert_eq!(parse_selection_list(Some(r#"["a","b"]"#)), strings(&["a", "b"]));
    assert!(parse_selection_list(Some("not json")).is_empty());
    assert!(parse_selection_list(Some("  ")).is_empty());
    assert!(parse_selection_list(None).is_empty());
}
