use cucumber::{given, then, when};
use konnekt_practice_core::{ActivityState, PracticeCommand, PracticeEvent, RecordingStatus};
use konnekt_practice_gateway::ScriptedReply;
use konnekt_practice_tests::{fixtures, PracticeWorld};

// ===== Given Steps =====

#[given(expr = "the AI will give the writing topic {string}")]
async fn ai_writing_topic(world: &mut PracticeWorld, topic: String) {
    world.script(ScriptedReply::Text(topic));
}

#[given(expr = "the AI will ask the speaking question {string}")]
async fn ai_speaking_question(world: &mut PracticeWorld, question: String) {
    world.script(ScriptedReply::Text(question));
}

#[given(expr = "the AI will teach the word {string}")]
async fn ai_vocabulary_word(world: &mut PracticeWorld, word: String) {
    world.script(ScriptedReply::Json(fixtures::vocabulary(&word)));
}

// ===== When Steps =====

#[when(expr = "the learner submits {string}")]
async fn learner_submits(world: &mut PracticeWorld, text: String) {
    world.execute(PracticeCommand::UpdateInput { text });
    world.execute(PracticeCommand::SubmitAnswer);
}

#[when(expr = "the learner says {string}")]
async fn learner_says(world: &mut PracticeWorld, transcript: String) {
    world.execute(PracticeCommand::StartRecording);
    world.execute(PracticeCommand::TranscriptCaptured { transcript });
}

#[when("the learner submits the spoken answer")]
async fn learner_submits_spoken(world: &mut PracticeWorld) {
    world.execute(PracticeCommand::SubmitAnswer);
}

#[when(expr = "speech recognition fails with {string}")]
async fn recognition_fails(world: &mut PracticeWorld, reason: String) {
    world.execute(PracticeCommand::StartRecording);
    world.execute(PracticeCommand::RecognitionFailed { reason });
}

#[when("the AI finds no mistakes")]
async fn ai_no_mistakes(world: &mut PracticeWorld) {
    world.script(ScriptedReply::Json(fixtures::writing_feedback(&[])));
    world.answer_latest().await;
}

#[when(expr = "the AI corrects {string} to {string}")]
async fn ai_corrects(world: &mut PracticeWorld, original: String, corrected: String) {
    world.script(ScriptedReply::Json(fixtures::writing_feedback(&[(
        original, corrected,
    )])));
    world.answer_latest().await;
}

#[when(expr = "the AI suggests the spoken correction {string}")]
async fn ai_spoken_correction(world: &mut PracticeWorld, correction: String) {
    world.script(ScriptedReply::Json(fixtures::speaking_feedback(&correction)));
    world.answer_latest().await;
}

#[when(expr = "the AI comments {string}")]
async fn ai_comments(world: &mut PracticeWorld, critique: String) {
    world.script(ScriptedReply::Text(critique));
    world.answer_latest().await;
}

// ===== Then Steps =====

#[then("the answer is rejected without a request")]
async fn answer_rejected(world: &mut PracticeWorld) {
    assert!(world.emitted(|e| matches!(e, PracticeEvent::InputRejected { .. })));
    assert!(!world.evaluation_pending());
    assert!(matches!(world.state(), Some(ActivityState::Ready { .. })));
}

#[then("an evaluation is pending")]
async fn evaluation_pending(world: &mut PracticeWorld) {
    assert!(world.evaluation_pending());
    assert!(matches!(world.state(), Some(ActivityState::Evaluating { .. })));
}

#[then(expr = "the closing line is {string}")]
async fn closing_line_is(world: &mut PracticeWorld, line: String) {
    match world.state() {
        Some(ActivityState::Evaluated { feedback, .. }) => {
            assert_eq!(feedback.summary(), Some(line.as_str()))
        }
        other => panic!("Expected an evaluated answer, got {:?}", other),
    }
}

#[then("there is no closing line")]
async fn no_closing_line(world: &mut PracticeWorld) {
    match world.state() {
        Some(ActivityState::Evaluated { feedback, .. }) => assert_eq!(feedback.summary(), None),
        other => panic!("Expected an evaluated answer, got {:?}", other),
    }
}

#[then(expr = "the captured answer is {string}")]
async fn captured_answer_is(world: &mut PracticeWorld, expected: String) {
    match world.state() {
        Some(ActivityState::Ready {
            input, recording, ..
        }) => {
            assert_eq!(input, &expected);
            assert_eq!(*recording, RecordingStatus::Idle);
        }
        other => panic!("Expected a ready question, got {:?}", other),
    }
}

#[then(expr = "the notice is {string}")]
async fn notice_is(world: &mut PracticeWorld, message: String) {
    match world.state() {
        Some(ActivityState::Ready {
            notice, recording, ..
        }) => {
            assert_eq!(notice.as_deref(), Some(message.as_str()));
            assert_eq!(*recording, RecordingStatus::Idle);
        }
        other => panic!("Expected a ready question, got {:?}", other),
    }
}

#[then("the previous answer is cleared")]
async fn previous_answer_cleared(world: &mut PracticeWorld) {
    match world.state() {
        Some(ActivityState::Ready { input, notice, .. }) => {
            assert!(input.is_empty());
            assert!(notice.is_none());
        }
        other => panic!("Expected a ready question, got {:?}", other),
    }
}
