//! Server-rendered screening page: form, inline errors, banner and result.

use crate::form::ValidationErrors;
use crate::render::html::{html_escape, render_banner, render_result_card};
use crate::render::ResultView;
use crate::types::{
    CategoricalCode, ChestPainType, ExerciseAngina, FastingBloodSugar, FormDraft, FormField,
    MajorVessels, RestingEcg, Sex, StSlope, Thalassemia,
};

/// Everything the page shows for one request.
#[derive(Debug, Default)]
pub struct FormPage<'a> {
    pub draft: FormDraft,
    pub errors: Option<&'a ValidationErrors>,
    pub banner: Option<String>,
    pub result: Option<ResultView>,
}

/// Select options for a categorical field, `None` for numeric inputs.
fn select_options(field: FormField) -> Option<Vec<(u8, &'static str)>> {
    fn all<C: CategoricalCode>() -> Vec<(u8, &'static str)> {
        C::ALL.iter().map(|c| (c.code(), c.label())).collect()
    }

    match field {
        FormField::Sex => Some(all::<Sex>()),
        FormField::ChestPainType => Some(all::<ChestPainType>()),
        FormField::FastingBs => Some(all::<FastingBloodSugar>()),
        FormField::RestingEcg => Some(all::<RestingEcg>()),
        FormField::ExerciseAngina => Some(all::<ExerciseAngina>()),
        FormField::StSlope => Some(all::<StSlope>()),
        FormField::MajorVessels => Some(all::<MajorVessels>()),
        FormField::Thalassemia => Some(all::<Thalassemia>()),
        FormField::Age
        | FormField::RestingBp
        | FormField::Cholesterol
        | FormField::MaxHr
        | FormField::StDepression => None,
    }
}

fn render_field(html: &mut String, field: FormField, value: &str, error: Option<&str>) {
    let key = field.key();
    let invalid = error.is_some();

    html.push_str(&format!(
        "      <div class=\"field{}\">\n        <label for=\"{key}\" title=\"{}\">{}</label>\n",
        if invalid { " field-invalid" } else { "" },
        html_escape(field.help()),
        field.label()
    ));

    match select_options(field) {
        Some(options) => {
            html.push_str(&format!(
                "        <select id=\"{key}\" name=\"{key}\"{}>\n",
                if invalid { " aria-invalid=\"true\"" } else { "" }
            ));
            let current = value.trim();
            let known = options.iter().any(|(code, _)| code.to_string() == current);
            if !known {
                html.push_str("          <option value=\"\" selected disabled>Select an option</option>\n");
            }
            for (code, label) in options {
                let selected = if code.to_string() == current { " selected" } else { "" };
                html.push_str(&format!(
                    "          <option value=\"{code}\"{selected}>{}</option>\n",
                    html_escape(label)
                ));
            }
            html.push_str("        </select>\n");
        }
        None => {
            let step = if field == FormField::StDepression { "0.1" } else { "any" };
            html.push_str(&format!(
                "        <input id=\"{key}\" name=\"{key}\" type=\"number\" step=\"{step}\" value=\"{}\"{}>\n",
                html_escape(value),
                if invalid { " aria-invalid=\"true\"" } else { "" }
            ));
        }
    }

    if let Some(message) = error {
        html.push_str(&format!(
            "        <p class=\"field-error\">{}</p>\n",
            html_escape(message)
        ));
    }
    html.push_str("      </div>\n");
}

/// Full HTML document for the screening page.
pub fn render_form_page(page: &FormPage<'_>) -> String {
    let mut html = String::new();

    html.push_str(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n  <title>HridayVani - Heart Disease Prediction</title>\n  <link rel=\"stylesheet\" href=\"/assets/style.css\">\n  <script src=\"/assets/form.js\" defer></script>\n</head>\n<body>\n",
    );
    html.push_str("<main>\n  <h1>Heart Disease Prediction</h1>\n");
    html.push_str(
        "  <p class=\"intro\">Enter your health metrics below to get a heart disease risk prediction.</p>\n",
    );

    html.push_str("  <form id=\"screening-form\" method=\"post\" action=\"/\">\n    <div class=\"grid\">\n");
    for field in FormField::ALL {
        let error = page.errors.and_then(|e| e.for_field(field));
        render_field(&mut html, field, page.draft.value(field), error);
    }
    html.push_str("    </div>\n");
    html.push_str(
        "    <button type=\"submit\" data-busy-label=\"Processing...\">Predict Heart Disease Risk</button>\n  </form>\n",
    );

    if let Some(message) = &page.banner {
        html.push_str(&render_banner(message));
    }
    if let Some(view) = &page.result {
        html.push_str(&render_result_card(view));
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}
