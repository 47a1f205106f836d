//! Compiled-in vocabularies and VAT rate sets.
//!
//! All patterns are lowercase; matching lower-cases the input first.

use super::{CountryRates, CurrencyVocabulary, LanguageTerms};

/// Currency vocabularies, ordered by ISO code.
pub(crate) const CURRENCIES: &[CurrencyVocabulary] = &[
    CurrencyVocabulary { code: "CHF", patterns: &["chf", "sfr"] },
    CurrencyVocabulary { code: "CZK", patterns: &["czk", "kč"] },
    CurrencyVocabulary { code: "DKK", patterns: &["dkk"] },
    CurrencyVocabulary { code: "EUR", patterns: &["€", "eur"] },
    CurrencyVocabulary { code: "GBP", patterns: &["£", "gbp"] },
    CurrencyVocabulary { code: "HUF", patterns: &["huf", "forint"] },
    CurrencyVocabulary { code: "ISK", patterns: &["isk", "kr", "krónur"] },
    CurrencyVocabulary { code: "JPY", patterns: &["¥", "jpy", "yen"] },
    CurrencyVocabulary { code: "NOK", patterns: &["nok"] },
    CurrencyVocabulary { code: "PLN", patterns: &["pln", "zł"] },
    CurrencyVocabulary { code: "SEK", patterns: &["sek"] },
    CurrencyVocabulary { code: "USD", patterns: &["$", "usd"] },
];

/// English terms, also used when no language is detected.
pub(crate) const ENGLISH: LanguageTerms = LanguageTerms {
    language: "en",
    vat: &["vat", "tax", "gst"],
    total: &["total", "amount due", "balance due"],
    subtotal: &["subtotal", "sub-total", "sub total", "net amount"],
};

/// Per-language term lists, ordered by language code.
pub(crate) const LANGUAGES: &[LanguageTerms] = &[
    LanguageTerms {
        language: "da",
        vat: &["moms"],
        total: &["total", "i alt", "at betale"],
        subtotal: &["subtotal", "ekskl. moms", "ekskl moms"],
    },
    LanguageTerms {
        language: "de",
        vat: &["mwst", "mehrwertsteuer", "umsatzsteuer"],
        total: &["summe", "gesamt", "zu zahlen", "total"],
        subtotal: &["zwischensumme", "nettobetrag", "netto"],
    },
    ENGLISH,
    LanguageTerms {
        language: "es",
        vat: &["iva"],
        total: &["total", "importe"],
        subtotal: &["subtotal", "base imponible"],
    },
    LanguageTerms {
        language: "fi",
        vat: &["alv"],
        total: &["yhteensä", "summa"],
        subtotal: &["välisumma", "veroton"],
    },
    LanguageTerms {
        language: "fr",
        vat: &["tva"],
        total: &["total", "net à payer", "montant ttc"],
        subtotal: &["sous-total", "total ht", "montant ht"],
    },
    LanguageTerms {
        language: "is",
        vat: &["vsk", "virðisaukaskattur"],
        total: &["samtals", "alls", "til greiðslu"],
        subtotal: &["millisamtals", "án vsk"],
    },
    LanguageTerms {
        language: "it",
        vat: &["iva"],
        total: &["totale", "importo"],
        subtotal: &["subtotale", "imponibile"],
    },
    LanguageTerms {
        language: "nb",
        vat: &["mva"],
        total: &["totalt", "å betale", "sum"],
        subtotal: &["delsum", "eks. mva", "eks mva"],
    },
    LanguageTerms {
        language: "nl",
        vat: &["btw"],
        total: &["totaal", "te betalen"],
        subtotal: &["subtotaal", "excl. btw", "excl btw"],
    },
    LanguageTerms {
        language: "pl",
        vat: &["ptu", "vat"],
        total: &["razem", "suma", "do zapłaty"],
        subtotal: &["netto", "razem netto"],
    },
    LanguageTerms {
        language: "sv",
        vat: &["moms", "mervärdesskatt"],
        total: &["totalt", "summa", "att betala"],
        subtotal: &["delsumma", "exkl. moms", "exkl moms"],
    },
];

/// Fixed language to country mapping.
pub(crate) const LANGUAGE_COUNTRIES: &[(&str, &str)] = &[
    ("da", "DK"),
    ("de", "DE"),
    ("en", "GB"),
    ("es", "ES"),
    ("fi", "FI"),
    ("fr", "FR"),
    ("is", "IS"),
    ("it", "IT"),
    ("nb", "NO"),
    ("nl", "NL"),
    ("pl", "PL"),
    ("sv", "SE"),
];

/// Common VAT rates per country as `(mantissa, scale)` pairs, most common first.
pub(crate) const COUNTRY_RATES: &[CountryRates] = &[
    CountryRates { country: "DE", currency: "EUR", rates: &[(19, 0), (7, 0)] },
    CountryRates { country: "DK", currency: "DKK", rates: &[(25, 0)] },
    CountryRates { country: "ES", currency: "EUR", rates: &[(21, 0), (10, 0), (4, 0)] },
    CountryRates { country: "FI", currency: "EUR", rates: &[(255, 1), (24, 0), (14, 0), (10, 0)] },
    CountryRates { country: "FR", currency: "EUR", rates: &[(20, 0), (10, 0), (55, 1), (21, 1)] },
    CountryRates { country: "GB", currency: "GBP", rates: &[(20, 0), (5, 0)] },
    CountryRates { country: "IS", currency: "ISK", rates: &[(24, 0), (11, 0)] },
    CountryRates { country: "IT", currency: "EUR", rates: &[(22, 0), (10, 0), (5, 0), (4, 0)] },
    CountryRates { country: "NL", currency: "EUR", rates: &[(21, 0), (9, 0)] },
    CountryRates { country: "NO", currency: "NOK", rates: &[(25, 0), (15, 0), (12, 0)] },
    CountryRates { country: "PL", currency: "PLN", rates: &[(23, 0), (8, 0), (5, 0)] },
    CountryRates { country: "SE", currency: "SEK", rates: &[(25, 0), (12, 0), (6, 0)] },
];
