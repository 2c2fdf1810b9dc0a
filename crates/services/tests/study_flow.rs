use std::collections::HashSet;

use prep_core::model::Question;
use prep_core::sampling::TEST_SIZE;
use prep_core::time::fixed_clock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AppServices, LocalStore, StoreConfig, TestMode};

fn bank(n: usize) -> Vec<Question> {
    let raw: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "question": format!("Question {i}"),
                "options": ["A", "B", "C", "D"],
                "correctAnswer": i % 4,
                "explanation": format!("Because {i}"),
            })
        })
        .collect();
    serde_json::from_value(serde_json::Value::Array(raw)).unwrap()
}

#[tokio::test]
async fn random_test_round_trip_updates_dashboard() {
    let app = AppServices::with_store(StoreConfig::default(), LocalStore::in_memory(fixed_clock()));
    let questions = bank(120);
    let mut rng = StdRng::seed_from_u64(11);

    let mut session = app
        .start_quiz(&questions, app.random_mode(), &mut rng)
        .unwrap();
    assert_eq!(session.total(), TEST_SIZE);

    let mut seen = HashSet::new();
    loop {
        let question = session.current_question().unwrap().clone();
        assert!(seen.insert(question.question.clone()));
        // answer the first 24 correctly, the rest wrong
        let choice = if session.position() < 24 {
            question.correct_answer
        } else {
            (question.correct_answer + 1) % question.options.len()
        };
        session.answer(choice).unwrap();
        if !session.advance().unwrap() {
            break;
        }
    }
    app.finish_quiz(&mut session).await.unwrap();

    let report = session.report().unwrap();
    assert_eq!(report.result.score().score(), 24);
    assert_eq!(report.percent, 80);
    assert!(report.passed);

    app.store().record_section_read("ch1-s1").await.unwrap();
    app.store().submit_display_name(" Sam ").await.unwrap();

    let dashboard = app.dashboard().await.unwrap();
    assert_eq!(dashboard.quizzes_taken, 1);
    assert_eq!(dashboard.accuracy_percent, 80);
    assert_eq!(dashboard.sections_read, 1);
    assert_eq!(dashboard.read_percent, 2);
    assert_eq!(dashboard.greeting(), "Welcome back, Sam!");
}

#[tokio::test]
async fn practice_mode_walks_the_whole_bank_in_order() {
    let app = AppServices::with_store(StoreConfig::default(), LocalStore::in_memory(fixed_clock()));
    let questions = bank(5);
    let mut rng = StdRng::seed_from_u64(0);

    let mut session = app
        .start_quiz(&questions, TestMode::Practice, &mut rng)
        .unwrap();
    let mut order = Vec::new();
    loop {
        let q = session.current_question().unwrap().clone();
        order.push(q.question.clone());
        session.answer(0).unwrap();
        if !session.advance().unwrap() {
            break;
        }
    }
    let expected: Vec<String> = questions.iter().map(|q| q.question.clone()).collect();
    assert_eq!(order, expected);

    app.finish_quiz(&mut session).await.unwrap();
    // questions 0 and 4 have correct answer 0
    assert_eq!(session.report().unwrap().result.score().score(), 2);
    assert!(!session.report().unwrap().passed);
}

#[tokio::test]
async fn open_uses_configured_database() {
    let config = StoreConfig {
        database_url: "sqlite:file:svc_app_open?mode=memory&cache=shared".into(),
        ..StoreConfig::default()
    };
    let app = AppServices::open(config, fixed_clock()).await.unwrap();
    app.store().record_quiz_result(30, 30).await.unwrap();
    assert_eq!(app.dashboard().await.unwrap().accuracy_percent, 100);
    app.shutdown().await;
}
