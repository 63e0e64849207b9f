//! Builtin categories and system templates
//!
//! Seeded into a fresh store by `cb init` so the board is usable out of the
//! box. Seeding is skipped when templates already exist.

use tracing::info;

use crate::domain::{Category, Priority, TaskBlueprint, Template};
use crate::store::{Store, StoreResult};

/// Default category set
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Home").with_icon("🏠").with_color("#4ade80"),
        Category::new("School").with_icon("🎒").with_color("#60a5fa"),
        Category::new("Health").with_icon("💚").with_color("#f87171"),
        Category::new("Shopping").with_icon("🛒").with_color("#fbbf24"),
        Category::new("Hobbies").with_icon("⚽").with_color("#a78bfa"),
        Category::new("Other").with_icon("📌").with_color("#9ca3af"),
    ]
}

/// Builtin system templates
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new("Morning Routine", "Home")
            .with_description("Start your day right with this morning routine")
            .with_icon("☀️")
            .system()
            .with_task(TaskBlueprint::new("Wake up", "Home", Priority::Medium, 5, 1))
            .with_task(TaskBlueprint::new("Make bed", "Home", Priority::Low, 10, 2))
            .with_task(TaskBlueprint::new("Brush teeth", "Health", Priority::High, 10, 3))
            .with_task(TaskBlueprint::new("Eat breakfast", "Health", Priority::High, 15, 4))
            .with_task(TaskBlueprint::new("Get dressed", "Home", Priority::Medium, 10, 5)),
        Template::new("Weekly Cleaning", "Home")
            .with_description("Keep your home clean with this weekly routine")
            .with_icon("🧹")
            .system()
            .with_task(TaskBlueprint::new("Vacuum all rooms", "Home", Priority::Medium, 30, 1))
            .with_task(TaskBlueprint::new("Mop floors", "Home", Priority::Medium, 25, 2).depends_on(1))
            .with_task(TaskBlueprint::new("Clean bathrooms", "Home", Priority::High, 35, 3))
            .with_task(TaskBlueprint::new("Change bed sheets", "Home", Priority::Medium, 20, 4))
            .with_task(TaskBlueprint::new("Take out trash", "Home", Priority::High, 15, 5))
            .with_task(TaskBlueprint::new("Dust surfaces", "Home", Priority::Low, 15, 6)),
        Template::new("School Morning", "School")
            .with_description("Get ready for school efficiently")
            .with_icon("🎒")
            .system()
            .with_task(TaskBlueprint::new("Wake up on time", "School", Priority::Urgent, 10, 1))
            .with_task(TaskBlueprint::new("Eat breakfast", "Health", Priority::High, 15, 2))
            .with_task(TaskBlueprint::new("Pack school bag", "School", Priority::Urgent, 20, 3))
            .with_task(TaskBlueprint::new("Check homework", "School", Priority::High, 25, 4))
            .with_task(TaskBlueprint::new("Get dressed", "School", Priority::Medium, 10, 5))
            .with_task(TaskBlueprint::new("Leave on time", "School", Priority::Urgent, 15, 6).depends_on(5)),
        Template::new("Weekly Meal Prep", "Home")
            .with_description("Prepare meals for the week ahead")
            .with_icon("🍳")
            .system()
            .with_task(TaskBlueprint::new("Plan weekly menu", "Home", Priority::Medium, 20, 1))
            .with_task(TaskBlueprint::new("Make shopping list", "Shopping", Priority::Medium, 15, 2).depends_on(1))
            .with_task(TaskBlueprint::new("Buy groceries", "Shopping", Priority::High, 30, 3).depends_on(2))
            .with_task(TaskBlueprint::new("Prep vegetables", "Home", Priority::Medium, 25, 4).depends_on(3))
            .with_task(TaskBlueprint::new("Cook main dishes", "Home", Priority::Medium, 40, 5).depends_on(4))
            .with_task(TaskBlueprint::new("Portion and store", "Home", Priority::Medium, 20, 6).depends_on(5)),
        Template::new("Sports Training Day", "Hobbies")
            .with_description("Prepare for your training session")
            .with_icon("⚽")
            .system()
            .with_task(TaskBlueprint::new("Wash sports uniform", "Home", Priority::High, 15, 1))
            .with_task(TaskBlueprint::new("Pack sports bag", "Hobbies", Priority::High, 20, 2).depends_on(1))
            .with_task(TaskBlueprint::new("Prepare water bottle", "Health", Priority::Medium, 10, 3))
            .with_task(TaskBlueprint::new("Eat pre-training snack", "Health", Priority::Medium, 15, 4))
            .with_task(TaskBlueprint::new("Arrive 15 min early", "Hobbies", Priority::High, 20, 5)),
        Template::new("Travel Preparation", "Other")
            .with_description("Everything to do before a trip")
            .with_icon("✈️")
            .system()
            .with_task(TaskBlueprint::new("Check passport validity", "Other", Priority::Urgent, 20, 1))
            .with_task(TaskBlueprint::new("Book accommodation", "Other", Priority::High, 30, 2))
            .with_task(TaskBlueprint::new("Pack clothes", "Other", Priority::Medium, 25, 3))
            .with_task(TaskBlueprint::new("Pack toiletries", "Health", Priority::Medium, 15, 4))
            .with_task(TaskBlueprint::new("Charge devices", "Other", Priority::Medium, 10, 5))
            .with_task(TaskBlueprint::new("Print tickets", "Other", Priority::High, 15, 6))
            .with_task(TaskBlueprint::new("Arrange pet care", "Home", Priority::High, 20, 7))
            .with_task(TaskBlueprint::new("Stop mail delivery", "Home", Priority::Low, 10, 8)),
        Template::new("Homework Routine", "School")
            .with_description("Work through homework without forgetting anything")
            .with_icon("📚")
            .system()
            .with_task(TaskBlueprint::new("Check assignment list", "School", Priority::High, 10, 1))
            .with_task(TaskBlueprint::new("Gather materials", "School", Priority::Medium, 10, 2))
            .with_task(TaskBlueprint::new("Complete math homework", "School", Priority::High, 30, 3))
            .with_task(TaskBlueprint::new("Complete reading", "School", Priority::High, 25, 4))
            .with_task(TaskBlueprint::new("Review notes", "School", Priority::Medium, 20, 5))
            .with_task(TaskBlueprint::new("Pack bag for tomorrow", "School", Priority::High, 15, 6)),
        Template::new("Bedtime Routine", "Health")
            .with_description("Wind down for a good night's sleep")
            .with_icon("🌙")
            .system()
            .with_task(TaskBlueprint::new("Brush teeth", "Health", Priority::High, 10, 1))
            .with_task(TaskBlueprint::new("Take shower", "Health", Priority::Medium, 15, 2))
            .with_task(TaskBlueprint::new("Prepare clothes for tomorrow", "Home", Priority::Low, 10, 3))
            .with_task(TaskBlueprint::new("Set alarm", "Home", Priority::High, 5, 4))
            .with_task(TaskBlueprint::new("Read for 15 minutes", "Hobbies", Priority::Low, 15, 5))
            .with_task(TaskBlueprint::new("Lights out by 10 PM", "Health", Priority::Medium, 10, 6)),
    ]
}

/// Seed categories and builtin templates into a fresh store.
/// Returns the number of templates created; no-op when templates exist.
pub fn seed(store: &mut Store) -> StoreResult<usize> {
    if store.has_templates()? {
        info!("store already seeded, skipping");
        return Ok(0);
    }

    for category in default_categories() {
        store.create_category(&category)?;
    }
    let templates = builtin_templates();
    for template in &templates {
        store.create_template(template)?;
    }
    info!(templates = templates.len(), "seeded builtin templates");
    Ok(templates.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_are_valid() {
        for template in builtin_templates() {
            assert!(template.validate().is_ok(), "template {} invalid", template.name);
            assert!(template.is_system);
            // blueprints come out sorted ascending by order
            let orders: Vec<u32> = template.tasks.iter().map(|t| t.order).collect();
            let mut sorted = orders.clone();
            sorted.sort_unstable();
            assert_eq!(orders, sorted);
        }
    }

    #[test]
    fn test_builtin_dependencies_point_backward() {
        for template in builtin_templates() {
            for bp in &template.tasks {
                if let Some(dep) = bp.depends_on_order {
                    assert!(dep < bp.order, "{}: step {} depends forward", template.name, bp.order);
                }
            }
        }
    }

    #[test]
    fn test_builtin_catalog_complete() {
        let templates = builtin_templates();
        let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Morning Routine",
                "Weekly Cleaning",
                "School Morning",
                "Weekly Meal Prep",
                "Sports Training Day",
                "Travel Preparation",
                "Homework Routine",
                "Bedtime Routine",
            ]
        );
    }

    #[test]
    fn test_seed_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        let first = seed(&mut store).unwrap();
        assert_eq!(first, builtin_templates().len());

        let second = seed(&mut store).unwrap();
        assert_eq!(second, 0);
        assert_eq!(store.list_templates().unwrap().len(), first);
        assert_eq!(store.list_categories().unwrap().len(), default_categories().len());
    }
}
