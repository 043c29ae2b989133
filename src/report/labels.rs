//! Report labels and console messages per locale.

use crate::models::Locale;
use std::path::Path;

/// Every user-facing string of one locale.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub orders_by_zone: &'static str,
    pub orders_unit: &'static str,
    pub popular_products: &'static str,
    pub units_unit: &'static str,
    pub average_time_by_zone: &'static str,
    pub minutes_unit: &'static str,
    pub greeting: &'static str,
    pub reading: &'static str,
    pub saved_to: &'static str,
    pub done: &'static str,
    missing_file: &'static str,
    unreadable_file: &'static str,
}

static EN: Labels = Labels {
    title: "Order Report",
    orders_by_zone: "Orders by zone:",
    orders_unit: "orders",
    popular_products: "Most popular products:",
    units_unit: "units",
    average_time_by_zone: "Average delivery time by zone:",
    minutes_unit: "minutes",
    greeting: "🤖 Hi! I'm the order analysis robot.",
    reading: "📦 Reading the orders file...",
    saved_to: "✅ Report saved to:",
    done: "Analysis complete!",
    missing_file: "Oops! Could not find the file",
    unreadable_file: "Oops! Could not read the data in",
};

static ES: Labels = Labels {
    title: "Reporte de Pedidos",
    orders_by_zone: "Pedidos por zona:",
    orders_unit: "pedidos",
    popular_products: "Productos más populares:",
    units_unit: "unidades",
    average_time_by_zone: "Tiempo promedio de entrega por zona:",
    minutes_unit: "minutos",
    greeting: "🤖 ¡Hola! Soy el robot de análisis de pedidos.",
    reading: "📦 Leyendo el archivo de pedidos...",
    saved_to: "✅ Reporte guardado en:",
    done: "¡Análisis completo!",
    missing_file: "¡Ups! No pude encontrar el archivo",
    unreadable_file: "¡Ups! No pude leer los datos del archivo",
};

impl Labels {
    /// Labels for the given locale.
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }

    /// Message for an input file that does not exist.
    pub fn missing_file(&self, path: &Path) -> String {
        format!("{} {}", self.missing_file, path.display())
    }

    /// Message for an input file that exists but cannot be parsed.
    pub fn unreadable_file(&self, path: &Path) -> String {
        format!("{} {}", self.unreadable_file, path.display())
    }
}
