use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    A4,
    A3,
    Letter,
    Legal,
}

impl PaperSize {
    fn label(self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::A3 => "A3",
            Self::Letter => "Letter",
            Self::Legal => "Legal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Bw,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sides {
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    None,
    Spiral,
    Soft,
    Hard,
}

impl Binding {
    fn label(self) -> &'static str {
        match self {
            Self::None => "No",
            Self::Spiral => "Spiral",
            Self::Soft => "Soft",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperType {
    Normal,
    Bond,
    Glossy,
}

impl PaperType {
    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Bond => "Bond",
            Self::Glossy => "Glossy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stapling {
    None,
    Corner,
    Side,
}

impl Stapling {
    fn label(self) -> &'static str {
        match self {
            Self::None => "No",
            Self::Corner => "Corner",
            Self::Side => "Side",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverPage {
    None,
    Front,
    Back,
    FrontBack,
}

impl CoverPage {
    fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Front => "front",
            Self::Back => "back",
            Self::FrontBack => "front+back",
        }
    }
}

/// Configuration of a single print job, as collected by the upload flow.
///
/// `orientation` and `page_range_text` are carried for the operator's benefit
/// and never influence the price. `page_range_text` is free-form and is not
/// parsed anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    pub copies: u32,
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub color_mode: ColorMode,
    pub sides: Sides,
    pub binding: Binding,
    pub paper_type: PaperType,
    pub stapling: Stapling,
    pub page_range_text: String,
    pub hole_punch: bool,
    pub cover_page: CoverPage,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            copies: 1,
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            color_mode: ColorMode::Bw,
            sides: Sides::Single,
            binding: Binding::None,
            paper_type: PaperType::Normal,
            stapling: Stapling::None,
            page_range_text: String::new(),
            hole_punch: false,
            cover_page: CoverPage::None,
        }
    }
}

/// Rate card for the shop. Treated as an opaque input by the calculators:
/// never mutated, and partial tables are tolerated (see the lookup accessors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    #[serde(rename = "perPageBW")]
    pub per_page_bw: Decimal,
    pub per_page_color: Decimal,
    /// Per-page reduction applied when printing double-sided.
    pub double_sided_discount: Decimal,
    pub service_fee: Decimal,
    /// Flat fee per job.
    pub hole_punch_price: Decimal,
    /// Per cover; a front+back cover charges it twice.
    pub cover_page_price: Decimal,
    #[serde(default)]
    pub paper_size_multiplier: HashMap<PaperSize, Decimal>,
    #[serde(default)]
    pub paper_type_fees: HashMap<PaperType, Decimal>,
    #[serde(default)]
    pub binding_prices: HashMap<Binding, Decimal>,
    #[serde(default)]
    pub stapling_prices: HashMap<Stapling, Decimal>,
}

impl PricingConfig {
    /// Paper size multiplier, defaulting to 1 when the size is not configured.
    pub fn size_multiplier(&self, size: PaperSize) -> Decimal {
        self.paper_size_multiplier
            .get(&size)
            .copied()
            .unwrap_or(Decimal::ONE)
    }

    /// Per-page paper type fee, defaulting to 0 when not configured.
    pub fn paper_type_fee(&self, paper: PaperType) -> Decimal {
        self.paper_type_fees
            .get(&paper)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Flat binding fee, defaulting to 0 when not configured.
    pub fn binding_price(&self, binding: Binding) -> Decimal {
        self.binding_prices
            .get(&binding)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Flat stapling fee, defaulting to 0 when not configured.
    pub fn stapling_price(&self, stapling: Stapling) -> Decimal {
        self.stapling_prices
            .get(&stapling)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for PricingConfig {
    /// The shop's standard rate card.
    fn default() -> Self {
        Self {
            per_page_bw: dec!(2),
            per_page_color: dec!(10),
            double_sided_discount: dec!(0.5),
            service_fee: dec!(5),
            hole_punch_price: dec!(10),
            cover_page_price: dec!(15),
            paper_size_multiplier: HashMap::from([
                (PaperSize::A4, dec!(1)),
                (PaperSize::A3, dec!(2)),
                (PaperSize::Letter, dec!(1)),
                (PaperSize::Legal, dec!(1.5)),
            ]),
            paper_type_fees: HashMap::from([
                (PaperType::Normal, dec!(0)),
                (PaperType::Bond, dec!(2)),
                (PaperType::Glossy, dec!(5)),
            ]),
            binding_prices: HashMap::from([
                (Binding::None, dec!(0)),
                (Binding::Spiral, dec!(25)),
                (Binding::Soft, dec!(60)),
                (Binding::Hard, dec!(150)),
            ]),
            stapling_prices: HashMap::from([
                (Stapling::None, dec!(0)),
                (Stapling::Corner, dec!(2)),
                (Stapling::Side, dec!(5)),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub lines: Vec<BreakdownLine>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotal {
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
}

/// Computes the price of a single print job.
///
/// The step order is fixed: per-page cost (base rate minus the double-sided
/// discount, clamped at zero), then the paper size multiplier, then per-page
/// paper type fees, then the flat fees (binding, stapling, hole punch, cover
/// pages), and finally the whole accumulated total multiplied by `copies`.
/// Flat fees therefore scale with the number of copies; that is the shop's
/// published behavior and callers rely on it matching the live estimate.
///
/// Never fails: unknown table keys degrade to a neutral multiplier or fee.
pub fn calculate_print_price(
    options: &PrintOptions,
    page_count: u32,
    config: &PricingConfig,
) -> Decimal {
    let pages = Decimal::from(page_count);

    let base_rate = match options.color_mode {
        ColorMode::Color => config.per_page_color,
        ColorMode::Bw => config.per_page_bw,
    };
    let mut page_cost = base_rate * pages;

    if options.sides == Sides::Double {
        page_cost -= config.double_sided_discount * pages;
    }
    // The discount may never push the per-page component negative
    page_cost = page_cost.max(Decimal::ZERO);

    page_cost *= config.size_multiplier(options.paper_size);
    page_cost += config.paper_type_fee(options.paper_type) * pages;

    let mut total = page_cost;
    total += config.binding_price(options.binding);
    total += config.stapling_price(options.stapling);
    if options.hole_punch {
        total += config.hole_punch_price;
    }
    total += cover_page_fee(options.cover_page, config);

    total * Decimal::from(options.copies)
}

fn cover_page_fee(cover: CoverPage, config: &PricingConfig) -> Decimal {
    match cover {
        CoverPage::None => Decimal::ZERO,
        CoverPage::Front | CoverPage::Back => config.cover_page_price,
        CoverPage::FrontBack => config.cover_page_price * Decimal::TWO,
    }
}

/// Itemizes the price of a single print job, line by line.
///
/// Line amounts are post-multiplied by `copies`, so the sum of all lines
/// always equals [`calculate_print_price`] for the same inputs. The discount
/// line is clamped to the base page cost for the same reason: when the
/// per-page cost bottoms out at zero, the printed discount shrinks with it.
pub fn calculate_price_breakdown(
    options: &PrintOptions,
    page_count: u32,
    config: &PricingConfig,
) -> PriceBreakdown {
    let pages = Decimal::from(page_count);
    let copies = Decimal::from(options.copies);
    let mut lines = Vec::new();

    let base_rate = match options.color_mode {
        ColorMode::Color => config.per_page_color,
        ColorMode::Bw => config.per_page_bw,
    };
    let base_cost = base_rate * pages;
    lines.push(BreakdownLine {
        label: match options.color_mode {
            ColorMode::Color => "Color printing".to_string(),
            ColorMode::Bw => "B&W printing".to_string(),
        },
        amount: base_cost * copies,
        detail: Some(format!("{page_count} pg × ₹{base_rate}")),
    });

    let mut page_cost = base_cost;
    if options.sides == Sides::Double && config.double_sided_discount > Decimal::ZERO {
        let discount = (config.double_sided_discount * pages).min(base_cost);
        page_cost -= discount;
        lines.push(BreakdownLine {
            label: "Double-sided discount".to_string(),
            amount: -discount * copies,
            detail: Some(format!("-₹{}/pg", config.double_sided_discount)),
        });
    }

    let multiplier = config.size_multiplier(options.paper_size);
    if multiplier != Decimal::ONE {
        let surcharge = page_cost * (multiplier - Decimal::ONE);
        lines.push(BreakdownLine {
            label: format!("{} paper", options.paper_size.label()),
            amount: surcharge * copies,
            detail: Some(format!("×{multiplier}")),
        });
    }

    let paper_fee = config.paper_type_fee(options.paper_type);
    if paper_fee > Decimal::ZERO {
        lines.push(BreakdownLine {
            label: format!("{} paper", options.paper_type.label()),
            amount: paper_fee * pages * copies,
            detail: Some(format!("{page_count} pg × ₹{paper_fee}")),
        });
    }

    let binding_fee = config.binding_price(options.binding);
    if binding_fee > Decimal::ZERO {
        lines.push(BreakdownLine {
            label: format!("{} binding", options.binding.label()),
            amount: binding_fee * copies,
            detail: None,
        });
    }

    let stapling_fee = config.stapling_price(options.stapling);
    if stapling_fee > Decimal::ZERO {
        lines.push(BreakdownLine {
            label: format!("{} stapling", options.stapling.label()),
            amount: stapling_fee * copies,
            detail: None,
        });
    }

    if options.hole_punch && config.hole_punch_price > Decimal::ZERO {
        lines.push(BreakdownLine {
            label: "Hole punch".to_string(),
            amount: config.hole_punch_price * copies,
            detail: None,
        });
    }

    if options.cover_page != CoverPage::None {
        lines.push(BreakdownLine {
            label: format!("Cover page ({})", options.cover_page.label()),
            amount: cover_page_fee(options.cover_page, config) * copies,
            detail: None,
        });
    }

    let total = lines.iter().map(|line| line.amount).sum();
    PriceBreakdown { lines, total }
}

/// Totals a cart. The service fee applies once per order, only when the cart
/// holds at least one item.
pub fn calculate_cart_total(items: &[CartItem], config: &PricingConfig) -> CartTotal {
    let subtotal: Decimal = items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum();
    let service_fee = if items.is_empty() {
        Decimal::ZERO
    } else {
        config.service_fee
    };
    CartTotal {
        subtotal,
        service_fee,
        total: subtotal + service_fee,
    }
}
