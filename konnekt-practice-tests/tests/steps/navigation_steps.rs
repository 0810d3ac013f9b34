use cucumber::{given, then, when};
use konnekt_practice_core::{
    ActivityKind, ActivityState, PracticeCommand, PracticeEvent, SpeechCapabilities, StateName,
};
use konnekt_practice_gateway::ScriptedReply;
use konnekt_practice_tests::PracticeWorld;

fn parse_state(name: &str) -> StateName {
    match name {
        "loading" => StateName::Loading,
        "ready" => StateName::Ready,
        "answered" => StateName::Answered,
        "evaluating" => StateName::Evaluating,
        "evaluated" => StateName::Evaluated,
        "failed" => StateName::Error,
        other => panic!("Unknown state '{}'", other),
    }
}

// ===== Given Steps =====

#[given("the learner is on the menu")]
async fn learner_on_menu(world: &mut PracticeWorld) {
    assert_eq!(world.event_loop.active_kind(), ActivityKind::Menu);
}

#[given("the environment has no speech synthesis")]
async fn no_speech_synthesis(world: &mut PracticeWorld) {
    *world = PracticeWorld::with_capabilities(SpeechCapabilities {
        synthesis: false,
        recognition: true,
    });
}

#[given("the environment has no speech recognition")]
async fn no_speech_recognition(world: &mut PracticeWorld) {
    *world = PracticeWorld::with_capabilities(SpeechCapabilities {
        synthesis: true,
        recognition: false,
    });
}

// ===== When Steps =====

#[when(expr = "the learner opens the {word} activity")]
async fn open_activity(world: &mut PracticeWorld, name: String) {
    let kind: ActivityKind = name.parse().expect("Unknown activity name");
    world.execute(PracticeCommand::SelectActivity { kind });
}

#[when("the learner returns to the menu")]
async fn return_to_menu(world: &mut PracticeWorld) {
    world.execute(PracticeCommand::ReturnToMenu);
}

#[when("the learner asks for the next question")]
async fn next_question(world: &mut PracticeWorld) {
    world.execute(PracticeCommand::RequestNext);
}

#[when("the AI responds")]
async fn ai_responds(world: &mut PracticeWorld) {
    world.answer_latest().await;
}

#[when(expr = "the AI fails with {string}")]
async fn ai_fails(world: &mut PracticeWorld, message: String) {
    world.script(ScriptedReply::Fail(message));
    world.answer_latest().await;
}

#[when(expr = "the AI answers the earlier request with the topic {string}")]
async fn ai_answers_earlier_request(world: &mut PracticeWorld, topic: String) {
    world.script(ScriptedReply::Text(topic));
    world.answer_oldest().await;
}

// ===== Then Steps =====

#[then(expr = "the activity is {word}")]
async fn activity_is(world: &mut PracticeWorld, state: String) {
    assert_eq!(world.state_name(), Some(parse_state(&state)));
}

#[then("the menu is shown")]
async fn menu_is_shown(world: &mut PracticeWorld) {
    assert_eq!(world.event_loop.active_kind(), ActivityKind::Menu);
    assert!(world.state().is_none());
}

#[then(expr = "the score is {int}")]
async fn score_is(world: &mut PracticeWorld, score: u32) {
    assert_eq!(world.score(), score);
}

#[then(expr = "the error message is {string}")]
async fn error_message_is(world: &mut PracticeWorld, message: String) {
    match world.state() {
        Some(ActivityState::Error(failure)) => assert_eq!(failure.message, message),
        other => panic!("Expected an error state, got {:?}", other),
    }
}

#[then("no request was sent")]
async fn no_request_sent(world: &mut PracticeWorld) {
    assert!(world.pending.is_empty(), "Pending: {:?}", world.pending);
}

#[then(expr = "{int} content request(s) is/are pending")]
async fn content_requests_pending(world: &mut PracticeWorld, count: usize) {
    assert_eq!(world.pending.len(), count);
}

#[then("the result is discarded as stale")]
async fn result_is_stale(world: &mut PracticeWorld) {
    assert!(world.emitted(|e| matches!(e, PracticeEvent::StaleResultDiscarded { .. })));
}

#[then("no content is carried over")]
async fn no_content_carried_over(world: &mut PracticeWorld) {
    let state = world.state().expect("No active activity");
    assert!(state.content().is_none(), "Unexpected content: {:?}", state);
}

#[then(expr = "the command fails with {string}")]
async fn command_fails(world: &mut PracticeWorld, reason: String) {
    assert_eq!(world.last_error.as_deref(), Some(reason.as_str()));
}
