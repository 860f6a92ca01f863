//! Route table and navigation bar state.

use reqwest::Url;

use super::session::AuthSession;

/// Every page the storefront can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Pets,
    PetDetail(String),
    Cart,
    Login,
    Register,
    Profile,
    GetStarted,
    Food,
    FoodDetail(String),
    Equipment,
    EquipmentDetail(String),
    SellerDashboard,
    ManageRabbits,
    AddRabbit,
    ManageOrders,
    Shipping,
    Statistics,
    Search { query: Option<String> },
    Parents,
    Booking,
    NotFound,
}

impl Route {
    /// Resolve a browser path (optionally with a query string)
    pub fn parse(path: &str) -> Route {
        let Ok(url) = Url::parse("http://storefront.local").and_then(|base| base.join(path)) else {
            return Route::NotFound;
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] | ["home"] => Route::Home,
            ["pets"] => Route::Pets,
            ["pets", id] => Route::PetDetail(id.to_string()),
            ["cart"] => Route::Cart,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["profile"] => Route::Profile,
            ["get-started"] => Route::GetStarted,
            ["pet-food"] => Route::Food,
            ["pet-food", id] => Route::FoodDetail(id.to_string()),
            ["equipment"] => Route::Equipment,
            ["equipment", id] => Route::EquipmentDetail(id.to_string()),
            ["seller-dashboard"] => Route::SellerDashboard,
            ["manage-rabbits"] => Route::ManageRabbits,
            ["add-rabbit"] => Route::AddRabbit,
            ["manage-orders"] => Route::ManageOrders,
            ["shipping"] => Route::Shipping,
            ["statistics"] => Route::Statistics,
            ["search"] => Route::Search {
                query: url
                    .query_pairs()
                    .find(|(key, _)| key == "query")
                    .map(|(_, value)| value.into_owned()),
            },
            ["parents"] => Route::Parents,
            ["booking"] => Route::Booking,
            _ => Route::NotFound,
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Pets => "/pets".to_string(),
            Route::PetDetail(id) => format!("/pets/{}", id),
            Route::Cart => "/cart".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::GetStarted => "/get-started".to_string(),
            Route::Food => "/pet-food".to_string(),
            Route::FoodDetail(id) => format!("/pet-food/{}", id),
            Route::Equipment => "/equipment".to_string(),
            Route::EquipmentDetail(id) => format!("/equipment/{}", id),
            Route::SellerDashboard => "/seller-dashboard".to_string(),
            Route::ManageRabbits => "/manage-rabbits".to_string(),
            Route::AddRabbit => "/add-rabbit".to_string(),
            Route::ManageOrders => "/manage-orders".to_string(),
            Route::Shipping => "/shipping".to_string(),
            Route::Statistics => "/statistics".to_string(),
            Route::Search { query: None } => "/search".to_string(),
            Route::Search { query: Some(q) } => match Url::parse("http://storefront.local/search") {
                Ok(mut url) => {
                    url.query_pairs_mut().append_pair("query", q);
                    format!("{}?{}", url.path(), url.query().unwrap_or_default())
                }
                Err(_) => "/search".to_string(),
            },
            Route::Parents => "/parents".to_string(),
            Route::Booking => "/booking".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Pages that send a guest to the login page instead
    pub fn requires_login(&self) -> bool {
        matches!(self, Route::Profile)
    }

    /// Where to actually go for this route given the session
    pub fn resolve(self, session: &AuthSession) -> Route {
        if self.requires_login() && !session.is_logged_in() {
            Route::Login
        } else {
            self
        }
    }
}

/// Navigation bar state derived from the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    /// Username shown for a logged-in user
    pub greeting: Option<String>,
    /// Profile for a logged-in user, login otherwise
    pub account: Route,
}

impl NavBar {
    pub fn new(session: &AuthSession) -> Self {
        match session.user() {
            Some(user) => Self {
                greeting: Some(user.username.clone()),
                account: Route::Profile,
            },
            None => Self {
                greeting: None,
                account: Route::Login,
            },
        }
    }

    /// Name to greet; guests are greeted as "guest"
    pub fn display_name(&self) -> &str {
        self.greeting.as_deref().unwrap_or("guest")
    }

    /// Links in display order
    pub fn links(&self) -> Vec<(&'static str, Route)> {
        vec![
            ("Home", Route::Home),
            ("Pets", Route::Pets),
            ("Cart", Route::Cart),
            ("Account", self.account.clone()),
        ]
    }

    /// Search page for a query; blank queries go nowhere
    pub fn search(query: &str) -> Option<Route> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Route::Search {
            query: Some(query.to_string()),
        })
    }
}
