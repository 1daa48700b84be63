use dioxus::prelude::*;

use prakriti_core::model::{Answer, Dosha};

use crate::context::AppContext;
use crate::views::ResultPanel;
use crate::vm::AssessmentVm;

const DEFAULT_RATING: u8 = 3;

#[component]
pub fn AssessmentView() -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_signal(move || AssessmentVm::start(ctx.assessment().as_ref()));
    let selected = use_signal(|| Answer::Yes);
    let rating = use_signal(|| DEFAULT_RATING);
    let error = use_signal(|| None::<String>);

    let on_next = use_callback(move |()| {
        let mut vm = vm;
        let mut selected = selected;
        let mut rating = rating;
        let mut error = error;

        let result = vm.write().submit(selected(), rating());
        match result {
            Ok(_) => {
                error.set(None);
                // Fresh widgets for the next question, like a new page render.
                selected.set(Answer::Yes);
                rating.set(DEFAULT_RATING);
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    let on_restart = use_callback(move |()| {
        let mut vm = vm;
        let mut selected = selected;
        let mut rating = rating;
        let mut error = error;

        vm.write().restart();
        selected.set(Answer::Yes);
        rating.set(DEFAULT_RATING);
        error.set(None);
    });

    let vm_read = vm.read();
    let question = vm_read.question_text().map(str::to_string);
    let answered = vm_read.position();
    let progress = vm_read.progress_percent();
    let live = vm_read.live_percentages();
    let show_slider = vm_read.rating_applies(selected());
    let summary = vm_read.summary();
    drop(vm_read);

    let question_number = answered + 1;
    let live_entries = live.entries();
    let error_message = error();
    let yes_class = answer_class(selected() == Answer::Yes);
    let no_class = answer_class(selected() == Answer::No);

    rsx! {
        div { class: "page assessment-page",
            header { class: "assessment-header",
                h1 { "Prakriti Self-Assessment" }
                p { class: "assessment-credit", "Developed by Dr Prasanna Kulkarni – Atharva AyurTech" }
                p { class: "assessment-instructions",
                    "Answer each question with Yes/No, then rate how strongly it applies to you (1 = mild, 5 = very strong)."
                }
            }

            section { class: "assessment-progress",
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {progress}%" }
                }
                p { class: "progress-label", "Progress – {progress} % completed" }
            }

            section { class: "assessment-live",
                for (dosha, percent) in live_entries {
                    DoshaBar { dosha, percent }
                }
            }

            if let Some(summary) = summary {
                ResultPanel { summary, on_restart }
            } else if let Some(question) = question {
                section { class: "question-card",
                    h2 { class: "question-title", "Q{question_number}: {question}" }

                    div { class: "answer-buttons",
                        button {
                            class: "{yes_class}",
                            onclick: move |_| {
                                let mut selected = selected;
                                selected.set(Answer::Yes);
                            },
                            "Yes"
                        }
                        button {
                            class: "{no_class}",
                            onclick: move |_| {
                                let mut selected = selected;
                                selected.set(Answer::No);
                            },
                            "No"
                        }
                    }

                    if show_slider {
                        div { class: "intensity",
                            label { r#for: "intensity-slider",
                                "How strongly does this apply to you? (1 = mild, 5 = very strong)"
                            }
                            input {
                                id: "intensity-slider",
                                r#type: "range",
                                min: "1",
                                max: "5",
                                value: "{rating}",
                                oninput: move |evt| {
                                    let mut rating = rating;
                                    if let Ok(value) = evt.value().parse::<u8>() {
                                        rating.set(value);
                                    }
                                },
                            }
                            span { class: "intensity-value", "{rating}" }
                        }
                    }

                    if let Some(message) = error_message {
                        p { class: "assessment-error", "{message}" }
                    }

                    button {
                        class: "next-btn",
                        onclick: move |_| on_next.call(()),
                        "Next"
                    }
                }
            }
        }
    }
}

fn answer_class(is_selected: bool) -> &'static str {
    if is_selected {
        "answer-btn answer-btn--selected"
    } else {
        "answer-btn"
    }
}

#[component]
fn DoshaBar(dosha: Dosha, percent: f64) -> Element {
    let width = percent.clamp(0.0, 100.0);
    let value_label = format!("{percent:.1}%");
    let fill_class = match dosha {
        Dosha::Vata => "bar-fill bar-fill--vata",
        Dosha::Pitta => "bar-fill bar-fill--pitta",
        Dosha::Kapha => "bar-fill bar-fill--kapha",
    };

    rsx! {
        div { class: "dosha-bar",
            span { class: "bar-label", "{dosha}" }
            div { class: "bar-track",
                div { class: "{fill_class}", style: "width: {width}%" }
            }
            span { class: "bar-value", "{value_label}" }
        }
    }
}
