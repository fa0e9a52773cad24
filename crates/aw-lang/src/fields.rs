use std::fmt;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Value kind a field exposes to the expression language. Determines which
/// operators a condition may use (checked at compile time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric value; supports equality and ordering.
    Number,
    /// Free-form text; string tests are case-insensitive.
    String,
    /// Text drawn from a closed vocabulary (e.g. listing type). Comparison
    /// semantics are identical to [`FieldKind::String`].
    EnumString,
    /// Set of strings; substring-family tests pass if any member passes.
    StringSet,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
            FieldKind::EnumString => "enum string",
            FieldKind::StringSet => "string set",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A resolved listing field. Compiled expressions store this instead of the
/// raw field token, so evaluation never re-parses names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Price,
    Currency,
    Category,
    Condition,
    ListingType,
    ShipsTo,
    Seller,
    SellerReputation,
}

impl Field {
    /// Resolve a field token (canonical name or alias, case-insensitive) to
    /// its descriptor. Returns `None` for unregistered names.
    pub fn resolve(token: &str) -> Option<Field> {
        let token = token.to_ascii_lowercase();
        let field = match token.as_str() {
            "title" => Field::Title,
            "description" => Field::Description,
            "price" => Field::Price,
            "currency" => Field::Currency,
            "category" => Field::Category,
            "condition" => Field::Condition,
            "listing_type" | "type" => Field::ListingType,
            "ships_to" | "shipping" => Field::ShipsTo,
            "seller" | "seller_username" => Field::Seller,
            "seller_reputation" => Field::SellerReputation,
            _ => return None,
        };
        Some(field)
    }

    /// Canonical name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Price => "price",
            Field::Currency => "currency",
            Field::Category => "category",
            Field::Condition => "condition",
            Field::ListingType => "listing_type",
            Field::ShipsTo => "ships_to",
            Field::Seller => "seller",
            Field::SellerReputation => "seller_reputation",
        }
    }

    /// Value kind of the field.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Price | Field::SellerReputation => FieldKind::Number,
            Field::Title | Field::Description | Field::Condition | Field::Seller => {
                FieldKind::String
            }
            Field::Currency | Field::Category | Field::ListingType => FieldKind::EnumString,
            Field::ShipsTo => FieldKind::StringSet,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
