//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the synchronous trading core and the outside
//! world: the venue, historical log files, and the market schedule.
//!
//! ```text
//!                 ┌───────────────────────────┐
//!                 │        Application        │
//!                 │  normalize → model → risk │
//!                 └─────────────┬─────────────┘
//!          ┌────────────────────┼────────────────────┐
//!          ▼                    ▼                    ▼
//!   ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//!   │ MarketData  │      │  OrderSink  │      │  Schedule / │
//!   │   Source    │      │             │      │  History    │
//!   └─────────────┘      └─────────────┘      └─────────────┘
//! ```

pub mod outbound;
