use dioxus::prelude::*;

use prakriti_core::model::{Dosha, DoshaScores};
use prakriti_core::summary::ResultSummary;

#[component]
pub fn ResultPanel(summary: ResultSummary, on_restart: EventHandler<()>) -> Element {
    let percentages = summary.percentages();
    let dominant = summary.dominant();
    let pie_style = format!("background: {}", pie_gradient(&percentages));
    let distribution: Vec<(&'static str, String)> = percentages
        .entries()
        .iter()
        .map(|(dosha, percent)| (dosha.label(), format!("{percent:.2}%")))
        .collect();
    let legend: Vec<(String, String)> = percentages
        .entries()
        .iter()
        .map(|(dosha, percent)| {
            (
                format!("background: {}", wedge_color(*dosha)),
                format!("{dosha} – {percent:.1}%"),
            )
        })
        .collect();
    let interpretation = interpretation(dominant);

    rsx! {
        section { class: "result-panel",
            h2 { class: "result-title", "Assessment Complete!" }

            h3 { "Your Dosha Distribution (%)" }
            dl { class: "result-distribution",
                for (label, value) in distribution {
                    dt { "{label}" }
                    dd { "{value}" }
                }
            }

            p { class: "result-dominant", "Your dominant Prakriti is {dominant}" }

            div { class: "result-breakdown",
                div { class: "result-pie", style: "{pie_style}" }
                ul { class: "result-legend",
                    for (swatch_style, text) in legend {
                        li {
                            span { class: "legend-swatch", style: "{swatch_style}" }
                            "{text}"
                        }
                    }
                }
            }

            h3 { "Interpretation" }
            p { class: "result-interpretation", "{interpretation}" }

            footer { class: "result-credit",
                p {
                    "Source Credit: Questionnaire and scoring pattern adapted from Kishor Patwardhan et al., Institute of Medical Sciences, BHU."
                }
                p { "App Concept & Development: Dr Prasanna Kulkarni (Atharva AyurTech)" }
            }

            button {
                class: "restart-btn",
                onclick: move |_| on_restart.call(()),
                "Restart Assessment"
            }
        }
    }
}

/// CSS conic gradient splitting the disc by each category's share of the
/// summed percentages; equal thirds when nothing scored.
fn pie_gradient(percentages: &DoshaScores) -> String {
    let total: f64 = percentages
        .entries()
        .iter()
        .map(|(_, value)| value.max(0.0))
        .sum();

    let mut stops = Vec::new();
    let mut start = 0.0;
    for (dosha, value) in percentages.entries() {
        let share = if total > 0.0 {
            value.max(0.0) / total
        } else {
            1.0 / 3.0
        };
        let end = start + share * 100.0;
        stops.push(format!("{} {start:.2}% {end:.2}%", wedge_color(dosha)));
        start = end;
    }

    format!("conic-gradient({})", stops.join(", "))
}

fn wedge_color(dosha: Dosha) -> &'static str {
    match dosha {
        Dosha::Vata => "#87CEEB",
        Dosha::Pitta => "#F7B267",
        Dosha::Kapha => "#88C999",
    }
}

fn interpretation(dosha: Dosha) -> &'static str {
    match dosha {
        Dosha::Vata => {
            "Vata Prakriti – creative, active, variable energy; needs warmth and regular meals."
        }
        Dosha::Pitta => {
            "Pitta Prakriti – sharp intellect; benefits from cooling foods and calmness."
        }
        Dosha::Kapha => {
            "Kapha Prakriti – steady and compassionate; needs light diet and activity."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_shares_follow_percentages() {
        let mut percentages = DoshaScores::zero();
        percentages.set(Dosha::Vata, 50.0);
        percentages.set(Dosha::Pitta, 50.0);

        let gradient = pie_gradient(&percentages);
        assert!(gradient.starts_with("conic-gradient("));
        assert!(gradient.contains("#87CEEB 0.00% 50.00%"));
        assert!(gradient.contains("#F7B267 50.00% 100.00%"));
        assert!(gradient.contains("#88C999 100.00% 100.00%"));
    }

    #[test]
    fn empty_results_split_the_pie_evenly() {
        let gradient = pie_gradient(&DoshaScores::zero());
        assert!(gradient.contains("#87CEEB 0.00% 33.33%"));
    }
}
