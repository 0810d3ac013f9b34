use cucumber::{given, then, when};
use konnekt_practice_core::{ActivityState, PracticeCommand, PracticeEvent};
use konnekt_practice_gateway::ScriptedReply;
use konnekt_practice_tests::{fixtures, PracticeWorld};

// ===== Given Steps =====

#[given(
    expr = "the AI will ask the grammar question {string} with options {string}, answer {string} and hint {string}"
)]
async fn ai_grammar_question(
    world: &mut PracticeWorld,
    question: String,
    options: String,
    answer: String,
    hint: String,
) {
    let options = fixtures::split_options(&options);
    world.script(ScriptedReply::Json(fixtures::grammar(
        &question, &options, &answer, &hint,
    )));
}

#[given(
    expr = "the AI will play the sentence {string} and ask {string} with options {string} and answer {string}"
)]
async fn ai_listening_activity(
    world: &mut PracticeWorld,
    sentence: String,
    question: String,
    options: String,
    answer: String,
) {
    let options = fixtures::split_options(&options);
    world.script(ScriptedReply::Json(fixtures::listening(
        &sentence, &question, &options, &answer,
    )));
}

// ===== When Steps =====

#[when(expr = "the learner chooses {string}")]
async fn learner_chooses(world: &mut PracticeWorld, option: String) {
    world.execute(PracticeCommand::ChooseOption { option });
}

// ===== Then Steps =====

#[then(expr = "the feedback is {string}")]
async fn feedback_is(world: &mut PracticeWorld, message: String) {
    match world.state() {
        Some(ActivityState::Answered { outcome, .. }) => assert_eq!(outcome.message, message),
        other => panic!("Expected an answered question, got {:?}", other),
    }
}

#[then(expr = "the options are {string}")]
async fn options_are(world: &mut PracticeWorld, options: String) {
    let content = world
        .state()
        .and_then(ActivityState::content)
        .expect("No content shown");
    assert_eq!(
        content.options(),
        Some(fixtures::split_options(&options).as_slice())
    );
}

#[then("the score did not change")]
async fn score_unchanged(world: &mut PracticeWorld) {
    assert!(!world.emitted(|e| matches!(e, PracticeEvent::ScoreChanged { .. })));
}
