//! Nutrition result card for a calorie lookup.
//!
//! Values are displayed exactly as the backend sent them; nothing here
//! recomputes calories.

#[cfg(test)]
#[path = "result_card_test.rs"]
mod result_card_test;

use leptos::prelude::*;

use crate::net::types::CalorieResult;

pub const DISH_LABEL: &str = "Dish";
pub const SERVINGS_LABEL: &str = "Servings";
pub const PER_SERVING_LABEL: &str = "Calories / serving";
pub const TOTAL_LABEL: &str = "Total calories";
pub const SOURCE_LABEL: &str = "Source";

/// Labelled display strings for every field present on `result`, in card
/// order, starting with the dish name.
pub fn result_rows(result: &CalorieResult) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        (DISH_LABEL, result.dish_name.clone()),
        (SERVINGS_LABEL, result.servings.to_string()),
        (PER_SERVING_LABEL, result.calories_per_serving.to_string()),
        (TOTAL_LABEL, result.total_calories.to_string()),
    ];
    if let Some(source) = result.source.as_deref().filter(|s| !s.is_empty()) {
        rows.push((SOURCE_LABEL, source.to_owned()));
    }
    if let Some(ingredients) = result
        .ingredient_breakdown
        .as_ref()
        .and_then(|b| b.ingredients.as_deref())
        .filter(|s| !s.is_empty())
    {
        rows.push(("Ingredients", ingredients.to_owned()));
    }
    if let Some(fdc_id) = result.fdc_id {
        rows.push(("FDC ID", fdc_id.to_string()));
    }
    rows
}

#[component]
pub fn ResultCard(result: CalorieResult) -> impl IntoView {
    let title = result.dish_name.clone();
    let details = result_rows(&result)
        .into_iter()
        .filter(|(label, _)| *label != DISH_LABEL)
        .map(|(label, value)| {
            let class = if label == TOTAL_LABEL { "result-card__value result-card__value--total" } else { "result-card__value" };
            view! {
                <div class="result-card__row">
                    <div class="result-card__label">{label}</div>
                    <div class=class>{value}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="result-card">
            <h3 class="result-card__title">{title}</h3>
            <div class="result-card__grid">{details}</div>
        </div>
    }
}
