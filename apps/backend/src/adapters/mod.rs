//! SeaORM adapters. Functions here speak `DbErr`; the store layer maps it.

pub mod readings_sea;
