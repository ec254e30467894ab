//! Reference monthly expenses of a household, covering every tax topology.

use fisco_core::{ExpenseCategory, ExpenseLine, FallbackSplit, TaxTopology, VatRate};
use rust_decimal_macros::dec;

use crate::rates;

/// A monthly expense tree for a single-earner household.
pub fn reference_household() -> Vec<ExpenseCategory> {
    vec![
        ExpenseCategory::with_lines(
            "vivienda",
            "Vivienda",
            vec![
                ExpenseLine::new(
                    "Alquiler",
                    dec!(850),
                    VatRate::Zero,
                    TaxTopology::Exempt,
                ),
                ExpenseLine::new(
                    "Electricidad",
                    dec!(65),
                    VatRate::TwentyOne,
                    TaxTopology::ElectricityExcise {
                        special_rate: rates::ELECTRICITY_TAX,
                    },
                ),
                ExpenseLine::new(
                    "Gas natural",
                    dec!(40),
                    VatRate::TwentyOne,
                    TaxTopology::GasExcise {
                        special_rate: rates::GAS_TAX_SHARE,
                    },
                ),
                ExpenseLine::standard("Agua", dec!(30), VatRate::Ten),
                ExpenseLine::standard("Internet y móvil", dec!(45), VatRate::TwentyOne),
                ExpenseLine::new(
                    "Tasa de basuras",
                    dec!(8),
                    VatRate::Zero,
                    TaxTopology::DirectLevy,
                ),
            ],
        ),
        ExpenseCategory::with_lines(
            "alimentacion",
            "Alimentación",
            vec![
                ExpenseLine::standard("Pan, leche, fruta y verdura", dec!(120), VatRate::Four),
                ExpenseLine::standard("Carne, pescado y conservas", dec!(180), VatRate::Ten),
                ExpenseLine::standard("Droguería", dec!(30), VatRate::TwentyOne),
                ExpenseLine::new(
                    "Vino y cerveza",
                    dec!(20),
                    VatRate::TwentyOne,
                    TaxTopology::AlcoholExcise {
                        special_rate: rates::ALCOHOL_TAX_SHARE,
                    },
                ),
            ],
        ),
        ExpenseCategory::with_lines(
            "transporte",
            "Transporte",
            vec![
                ExpenseLine::new(
                    "Gasolina",
                    dec!(90),
                    VatRate::TwentyOne,
                    TaxTopology::FuelExcise {
                        price_per_unit: rates::PETROL_PRICE_PER_LITER,
                        excise_per_unit: rates::PETROL_EXCISE_PER_LITER,
                    },
                ),
                ExpenseLine::new(
                    "Seguro del coche",
                    dec!(35),
                    VatRate::Zero,
                    TaxTopology::InsurancePremium {
                        special_rate: rates::INSURANCE_PREMIUM_TAX,
                    },
                ),
                ExpenseLine::new(
                    "Impuesto de circulación",
                    dec!(6),
                    VatRate::Zero,
                    TaxTopology::DirectLevy,
                ),
                ExpenseLine::standard("Abono de transporte", dec!(20), VatRate::Ten),
            ],
        ),
        ExpenseCategory::with_lines(
            "tabaco",
            "Tabaco",
            vec![ExpenseLine::new(
                "Cajetillas",
                dec!(25),
                VatRate::TwentyOne,
                TaxTopology::TobaccoExcise {
                    special_rate: rates::TOBACCO_TAX_SHARE,
                },
            )],
        ),
        ExpenseCategory::with_fallback(
            "ocio",
            "Ocio y restauración",
            FallbackSplit {
                total: dec!(150),
                vat4_pct: dec!(0),
                vat10_pct: dec!(60),
                vat21_pct: dec!(40),
            },
        ),
    ]
}
