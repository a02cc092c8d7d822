//! Entities the backend serves, and where it serves them

use gymadmin_core::{Category, MembershipPlan, Order, Product, Subscription, User};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An entity with its own REST collection
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path below the API base URL
    const PATH: &'static str;

    /// Singular name for messages
    const NAME: &'static str;

    /// Backend identifier, empty before creation
    fn id(&self) -> &str;

    /// Replace the identifier
    fn set_id(&mut self, id: String);
}

macro_rules! resource {
    ($ty:ty, $path:literal, $name:literal) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

resource!(User, "users", "User");
resource!(MembershipPlan, "plans", "Plan");
resource!(Subscription, "subscriptions", "Subscription");
resource!(Product, "products", "Product");
resource!(Order, "orders", "Order");
resource!(Category, "categories", "Category");

/// Every collection path
pub const ALL_PATHS: [&str; 6] = [
    User::PATH,
    MembershipPlan::PATH,
    Subscription::PATH,
    Product::PATH,
    Order::PATH,
    Category::PATH,
];
