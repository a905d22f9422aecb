//! Shared domain types for the Zehnly admin console.
//!
//! Everything in here is plain data: the records the admin API serves
//! (coupons, popups, orders, analytics) and the admin user carried in the
//! login session. Wire envelopes live next to the endpoint clients in
//! `zehnly-client`.

pub mod types;

pub use types::analytics::{
    AnalyticsOverview, DailyNewUsers, DailyPremiumUsers, NewUser, PremiumUser, RangePagination,
};
pub use types::coupon::{Coupon, CouponUser, ParseRateKindError, Rate, RateKind, Subscription};
pub use types::order::{Order, OrderStatus, OrdersSummary, ParseOrderStatusError};
pub use types::popup::Popup;
pub use types::user::AdminUser;
