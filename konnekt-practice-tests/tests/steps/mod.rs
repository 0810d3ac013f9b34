mod choice_steps;
mod free_text_steps;
mod navigation_steps;
