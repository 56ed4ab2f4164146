//! Ordered keyword rules over normalised product names.
//!
//! Rules are evaluated top to bottom and the first match wins, so a rule whose
//! trigger words are a superset of another's must come first (airbag before
//! bonus, short strangle before strangle, and so on).
//!
//! Terms are whole words or phrases of the normalised name. A trailing `*`
//! turns a term into a word-prefix match (`autocall*` matches `autocallable`).

/// One keyword rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Every group must match; a group matches when any of its terms does.
    pub all_of: &'static [&'static [&'static str]],
    /// The rule is skipped when any of these terms matches.
    pub none_of: &'static [&'static str],
    /// Catalog key the rule resolves to.
    pub target: &'static str,
}

impl Rule {
    const fn new(
        all_of: &'static [&'static [&'static str]],
        none_of: &'static [&'static str],
        target: &'static str,
    ) -> Self {
        Self {
            all_of,
            none_of,
            target,
        }
    }

    /// Tests the rule against a space-padded normalised name.
    fn matches_padded(&self, padded: &str) -> bool {
        self.all_of
            .iter()
            .all(|group| group.iter().any(|term| contains_term(padded, term)))
            && !self.none_of.iter().any(|term| contains_term(padded, term))
    }

    /// Tests the rule against a normalised name.
    pub fn matches(&self, normalized: &str) -> bool {
        self.matches_padded(&pad(normalized))
    }
}

fn pad(normalized: &str) -> String {
    format!(" {} ", normalized)
}

fn contains_term(padded: &str, term: &str) -> bool {
    let bytes = padded.as_bytes();
    let (needle, prefix) = match term.strip_suffix('*') {
        Some(stem) => (stem, true),
        None => (term, false),
    };
    padded.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let starts_word = start > 0 && bytes.get(start - 1) == Some(&b' ');
        starts_word && (prefix || bytes.get(end) == Some(&b' '))
    })
}

const SHORT: &[&str] = &["short", "vente", "vendeur", "vendu", "sold", "written"];
const SPREAD: &[&str] = &["spread", "ecart"];
const BULL: &[&str] = &["bull", "bullish", "haussier*"];
const BEAR: &[&str] = &["bear", "bearish", "baissier*"];
const PUT: &[&str] = &["put"];
const CALL: &[&str] = &["call"];
const CAPPED: &[&str] = &["capped", "cap", "plafonne*"];
const BARRIER: &[&str] = &["barrier", "barriere"];
const DISCOUNT: &[&str] = &["discount", "decote", "escompte"];
const DIGITAL: &[&str] = &["digital*", "binary", "binaire*", "cash or nothing"];
const ASIAN: &[&str] = &["asian", "asiatique", "average*", "moyenne"];
const LOOKBACK: &[&str] = &["lookback", "look back", "retrospective", "retroviseur"];
const BUTTERFLY: &[&str] = &["butterfly", "papillon"];
const STRADDLE: &[&str] = &["straddle", "stellage"];

/// Variants with no catalog entry; a name carrying one of these must not
/// fall back to a plain call or put of the wrong kind.
const UNLISTED_VARIANTS: &[&str] = &[
    "ratio",
    "asset or nothing",
    "actif ou rien",
    "down and in",
    "down and out",
    "up and in",
    "up and out",
];
const UNLISTED_OR_SHORT: &[&str] = &[
    "ratio",
    "asset or nothing",
    "actif ou rien",
    "down and in",
    "down and out",
    "up and in",
    "up and out",
    "short",
    "vente",
    "vendeur",
    "vendu",
    "sold",
    "written",
];

/// Markers of credit-linked instruments, which have no terminal payoff chart.
pub const CREDIT_MARKERS: &[&str] = &[
    "credit linked",
    "credit link*",
    "cln",
    "cdo*",
    "cds",
    "credit default",
    "collateralized debt",
    "collateralised debt",
    "liee au credit",
    "lie au credit",
    "derive* de credit",
];

/// The rule table in priority order.
pub const RULES: &[Rule] = &[
    // basket and capital protection
    Rule::new(&[&["magic"]], &[], "Magic Asian Note"),
    Rule::new(&[&["himalaya"]], &[], "Himalaya Note"),
    Rule::new(&[&["captibasket"]], &[], "Captibasket Note"),
    Rule::new(
        &[&["shark fin", "sharkfin", "aileron de requin", "requin"]],
        &[],
        "Shark Fin Note",
    ),
    Rule::new(&[CAPPED, &["capital"]], &[], "Capped Capital Protected Note"),
    Rule::new(
        &[&["partial", "partiel*"], &["capital", "protection"]],
        &[],
        "Partial Capital Protection Note",
    ),
    Rule::new(
        &[&[
            "capital protected",
            "capital protection",
            "capital guaranteed",
            "principal protected",
            "capital garanti*",
            "capital protege*",
            "protection du capital",
            "protection totale",
        ]],
        &[],
        "Capital Protected Note",
    ),
    // income
    Rule::new(
        &[&["phoenix", "phenix", "memory", "memoire"]],
        &[],
        "Phoenix Memory Autocall",
    ),
    Rule::new(&[&["express"]], &[], "Express Certificate"),
    Rule::new(&[&["autocall*", "athena"]], &[], "Athena Autocall"),
    Rule::new(
        &[BARRIER, &["reverse convertible", "convertible inverse"]],
        &[],
        "Barrier Reverse Convertible",
    ),
    Rule::new(&[&["brc"]], &[], "Barrier Reverse Convertible"),
    Rule::new(
        &[&["reverse convertible", "convertible inverse", "revertible"]],
        &[],
        "Reverse Convertible",
    ),
    // participation
    Rule::new(&[&["airbag"]], &[], "Airbag Certificate"),
    Rule::new(&[CAPPED, &["bonus"]], &[], "Capped Bonus Certificate"),
    Rule::new(&[&["bonus"]], &[], "Bonus Certificate"),
    Rule::new(&[&["twin win", "twinwin", "twin"]], &[], "Twin Win Certificate"),
    Rule::new(
        &[&["trigger", "declencheur"], BARRIER, DISCOUNT],
        &[],
        "Trigger Barrier Discount Certificate",
    ),
    Rule::new(&[BARRIER, DISCOUNT], &[], "Barrier Discount Certificate"),
    Rule::new(&[DISCOUNT], &[], "Discount Certificate"),
    Rule::new(&[&["sprint"]], &[], "Sprint Certificate"),
    Rule::new(
        &[&["outperformance", "surperformance"]],
        &[],
        "Outperformance Certificate",
    ),
    // leverage
    Rule::new(
        &[&["turbo", "mini future*", "minifuture*"], &["short", "put", "bear", "baissier*"]],
        &[],
        "Turbo Short",
    ),
    Rule::new(&[&["mini future*", "minifuture*"]], &[], "Mini Future Long"),
    Rule::new(&[&["turbo"]], &[], "Turbo Long"),
    // FX structured
    Rule::new(
        &[&["dual currency", "double devise", "bi devise*", "dcd"]],
        &[],
        "Dual Currency Note",
    ),
    Rule::new(
        &[&["range accrual", "corridor", "accumulation"]],
        &[],
        "FX Range Accrual Note",
    ),
    Rule::new(
        &[&["tarf", "target redemption*"]],
        &[],
        "Target Redemption Forward",
    ),
    // arbitrage
    Rule::new(&[&["box"]], &[], "Box Spread"),
    Rule::new(&[&["reversal", "reverse conversion"]], &[], "Reversal"),
    Rule::new(&[&["conversion"]], &[], "Conversion"),
    // volatility
    Rule::new(
        &[&["iron butterfly", "iron fly", "papillon de fer"]],
        &[],
        "Iron Butterfly",
    ),
    Rule::new(
        &[&["iron condor", "condor de fer", "condor"]],
        &[],
        "Iron Condor",
    ),
    Rule::new(&[SHORT, BUTTERFLY], &[], "Short Butterfly"),
    Rule::new(&[BUTTERFLY], SHORT, "Long Butterfly"),
    Rule::new(&[SHORT, STRADDLE], &[], "Short Straddle"),
    Rule::new(&[STRADDLE], SHORT, "Long Straddle"),
    Rule::new(&[SHORT, &["strangle"]], &[], "Short Strangle"),
    Rule::new(&[&["strangle"]], SHORT, "Long Strangle"),
    Rule::new(&[&["calendar", "calendaire", "horizontal"]], &[], "Calendar Spread"),
    // spreads and hedged positions
    Rule::new(&[&["ratio"]], PUT, "Ratio Call Spread"),
    Rule::new(&[SHORT, CALL, SPREAD], &[], "Bear Call Spread"),
    Rule::new(&[SHORT, PUT, SPREAD], &[], "Bull Put Spread"),
    Rule::new(&[BULL, PUT, SPREAD], &[], "Bull Put Spread"),
    Rule::new(&[BEAR, CALL, SPREAD], &[], "Bear Call Spread"),
    Rule::new(&[BULL, SPREAD], &[], "Bull Call Spread"),
    Rule::new(&[BEAR, SPREAD], &[], "Bear Put Spread"),
    Rule::new(&[PUT, SPREAD], &["ratio"], "Bear Put Spread"),
    Rule::new(&[CALL, SPREAD], &[], "Bull Call Spread"),
    Rule::new(&[&["collar", "tunnel"]], &[], "Collar"),
    Rule::new(
        &[&["covered call", "call couvert", "buy write"]],
        &[],
        "Covered Call",
    ),
    Rule::new(
        &[&["protective put", "put protecteur", "married put"]],
        &[],
        "Protective Put",
    ),
    // digitals
    Rule::new(
        &[&["asset or nothing", "actif ou rien"]],
        PUT,
        "Asset-or-Nothing Call",
    ),
    Rule::new(&[DIGITAL, PUT], &[], "Digital Put"),
    Rule::new(&[DIGITAL], &[], "Digital Call"),
    // barrier options
    Rule::new(&[&["down and in"]], CALL, "Down-and-In Put"),
    Rule::new(&[&["knock in", "activante"], PUT], &[], "Down-and-In Put"),
    Rule::new(&[&["up and in", "knock in", "activante"]], PUT, "Up-and-In Call"),
    Rule::new(&[&["down and out"]], CALL, "Down-and-Out Put"),
    Rule::new(&[&["knock out", "desactivante"], PUT], &[], "Down-and-Out Put"),
    Rule::new(
        &[&["up and out", "knock out", "desactivante", "barrier option", "option barriere"]],
        PUT,
        "Up-and-Out Call",
    ),
    // path dependent
    Rule::new(&[ASIAN, PUT], &[], "Asian Put"),
    Rule::new(&[ASIAN], &[], "Asian Call"),
    Rule::new(&[LOOKBACK, PUT], &[], "Lookback Put"),
    Rule::new(&[LOOKBACK], &[], "Lookback Call"),
    // vanilla
    Rule::new(&[SHORT, PUT], UNLISTED_VARIANTS, "Short Put"),
    Rule::new(&[SHORT, CALL], UNLISTED_VARIANTS, "Short Call"),
    Rule::new(&[PUT], UNLISTED_OR_SHORT, "Long Put"),
    Rule::new(&[CALL], UNLISTED_OR_SHORT, "Long Call"),
];

/// First rule matching a normalised name.
pub fn first_match(normalized: &str) -> Option<&'static Rule> {
    let padded = pad(normalized);
    RULES.iter().find(|rule| rule.matches_padded(&padded))
}

/// Whether a normalised name carries a credit-linked marker.
pub fn is_credit_linked(normalized: &str) -> bool {
    let padded = pad(normalized);
    CREDIT_MARKERS.iter().any(|term| contains_term(&padded, term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_matching() {
        let padded = pad("long call");
        assert!(contains_term(&padded, "call"));
        assert!(contains_term(&padded, "long call"));
        assert!(!contains_term(&padded, "cal"));
        assert!(!contains_term(&pad("callable note"), "call"));
    }

    #[test]
    fn test_prefix_matching() {
        assert!(contains_term(&pad("autocallable note"), "autocall*"));
        assert!(contains_term(&pad("autocall"), "autocall*"));
        assert!(!contains_term(&pad("phoenix autocall"), "call*"));
    }

    #[test]
    fn test_exclusion_skips_rule() {
        let rule = Rule::new(&[STRADDLE], SHORT, "Long Straddle");
        assert!(rule.matches("straddle"));
        assert!(!rule.matches("short straddle"));
    }

    #[test]
    fn test_specific_before_general() {
        assert_eq!(first_match("airbag bonus certificate").unwrap().target, "Airbag Certificate");
        assert_eq!(
            first_match("discount barrier trigger").unwrap().target,
            "Trigger Barrier Discount Certificate"
        );
        assert_eq!(first_match("short strangle").unwrap().target, "Short Strangle");
        assert_eq!(first_match("strangle").unwrap().target, "Long Strangle");
    }

    #[test]
    fn test_typed_direction_is_respected() {
        assert_eq!(first_match("short call spread").unwrap().target, "Bear Call Spread");
        assert_eq!(first_match("vente put spread").unwrap().target, "Bull Put Spread");
        assert_eq!(first_match("call ratio spread").unwrap().target, "Ratio Call Spread");
        for name in [
            "down and out call",
            "down and in call",
            "up and in put",
            "up and out put",
            "asset or nothing put",
            "put ratio spread",
            "short down and in call",
        ] {
            assert!(first_match(name).is_none(), "{} matched a rule", name);
        }
    }

    #[test]
    fn test_credit_markers() {
        assert!(is_credit_linked("credit linked note"));
        assert!(is_credit_linked("synthetic cdo tranche"));
        assert!(is_credit_linked("cdos"));
        assert!(is_credit_linked("note liee au credit"));
        assert!(!is_credit_linked("accredited note"));
    }

    #[test]
    fn test_empty_name_matches_nothing() {
        assert!(first_match("").is_none());
        assert!(!is_credit_linked(""));
    }

    #[test]
    fn test_every_rule_has_terms() {
        for rule in RULES {
            assert!(!rule.all_of.is_empty(), "{}", rule.target);
            assert!(rule.all_of.iter().all(|group| !group.is_empty()));
        }
    }
}
