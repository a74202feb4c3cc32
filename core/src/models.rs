mod favorite;
mod notification;
mod recipe;

pub use favorite::{recipe_ids, FavoriteRecord};
pub use notification::{Notification, NotificationLevel};
pub use recipe::{RecipeId, RecipeSummary};
