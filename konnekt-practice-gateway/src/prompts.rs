//! Prompt texts for every gateway call.
//!
//! Learner text is quoted verbatim into the evaluation prompts.

pub fn listening_activity() -> String {
    "Write one short English sentence suitable for an A2-level learner. \
     The sentence will be read aloud to them. Add a multiple-choice \
     comprehension question about it with exactly 3 different options, \
     and give the correct answer copied exactly from the options."
        .to_string()
}

pub fn speaking_question() -> String {
    "Ask one simple, open-ended question that an English learner can answer \
     out loud in a sentence or two, such as 'What did you have for \
     breakfast today?'. Reply with the question only."
        .to_string()
}

pub fn speaking_evaluation(question: &str, answer: &str) -> String {
    format!(
        "An English learner was asked: \"{question}\". They answered: \"{answer}\".\n\
         Give friendly, encouraging feedback. If the answer contains mistakes, \
         provide a corrected version and explain the correction simply. \
         If there are no mistakes, leave the correction and explanation empty."
    )
}

pub fn writing_topic() -> String {
    "Suggest one short, everyday writing task for an English learner, such as \
     'Write 3 lines about your favorite food.'. Reply with the task only."
        .to_string()
}

pub fn writing_evaluation(topic: &str, text: &str) -> String {
    format!(
        "An English learner was given the task \"{topic}\" and wrote: \"{text}\".\n\
         Praise their effort, then list every grammar or spelling mistake. \
         For each mistake give the original snippet, the corrected version and \
         a short explanation. If there are no mistakes, return an empty list."
    )
}

pub fn vocabulary_word() -> String {
    "Teach one useful English word for an intermediate learner. Give its \
     meaning, an example sentence using it, and one synonym."
        .to_string()
}

pub fn vocabulary_evaluation(word: &str, sentence: &str) -> String {
    format!(
        "An English learner has just learned the word \"{word}\" and used it \
         in this sentence: \"{sentence}\".\n\
         Give short, friendly feedback. Say whether the word is used correctly \
         and gently correct the sentence if it is not."
    )
}

pub fn grammar_question() -> String {
    "Write one fill-in-the-blank grammar question for an English learner. \
     Mark the gap with ___, offer exactly 3 different options, give the \
     correct answer copied exactly from the options, and add a short hint \
     for learners who choose wrong."
        .to_string()
}
