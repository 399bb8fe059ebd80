//! Keyword FAQ lookup.

use serde::Serialize;

pub const FAQ_MISS_HINT: &str = "Tidak ada jawaban di FAQ. Silakan hubungi agent.";

struct FaqEntry {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const FAQS: &[FaqEntry] = &[
    FaqEntry {
        keywords: &[
            "cara blokir kartu debit",
            "debit hilang",
            "kartu debit hilang",
            "blokir debit",
        ],
        answer: "Untuk blokir kartu debit: buka aplikasi mobile banking \u{2192} menu Kartu \u{2192} Blokir Kartu, atau hubungi call center resmi. Siapkan data verifikasi (nama, tanggal lahir, 4 digit akhir rekening).",
    },
    FaqEntry {
        keywords: &["limit kartu kredit", "cek limit kredit", "sisa limit cc"],
        answer: "Cek limit kartu kredit melalui aplikasi mobile banking/website resmi pada menu Kartu Kredit \u{2192} Informasi Limit, atau hubungi call center untuk informasi terbaru.",
    },
    FaqEntry {
        keywords: &["biaya admin tabungan", "biaya bulanan tabungan"],
        answer: "Biaya admin tabungan bervariasi per jenis produk. Silakan cek brosur/website resmi produk tabungan atau tanyakan ke cabang terdekat.",
    },
    FaqEntry {
        keywords: &[
            "chargeback",
            "refund transaksi kartu kredit",
            "transaksi tidak dikenali kartu kredit",
        ],
        answer: "Untuk dispute/chargeback transaksi kartu kredit: laporkan maksimal 2\u{d7}24 jam sejak mengetahui transaksi, isi formulir dispute, dan lampirkan bukti pendukung. Proses investigasi mengikuti ketentuan penerbit.",
    },
    FaqEntry {
        keywords: &["reset pin", "lupa pin atm", "pin terblokir"],
        answer: "PIN terblokir/lupa: lakukan reset via ATM (Jika tersedia), aplikasi, atau ke cabang dengan membawa identitas dan buku tabungan/kartu terkait.",
    },
];

/// A matched FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqHit {
    pub answer: &'static str,
    pub matched_keywords: Vec<&'static str>,
}

/// Best FAQ entry for `query`: the one with the most keyword phrases
/// contained in the lower-cased query. Ties keep the earlier entry.
#[must_use]
pub fn faq_search(query: &str) -> Option<FaqHit> {
    let query = query.to_lowercase();

    let mut best: Option<(&FaqEntry, usize)> = None;
    for entry in FAQS {
        let hits = entry
            .keywords
            .iter()
            .filter(|kw| query.contains(*kw))
            .count();
        if hits > best.map_or(0, |(_, score)| score) {
            best = Some((entry, hits));
        }
    }

    best.map(|(entry, _)| FaqHit {
        answer: entry.answer,
        matched_keywords: entry.keywords.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_entry_by_keyword() {
        let hit = faq_search("Bagaimana cara RESET PIN saya?");
        assert!(hit.is_some_and(|h| h.answer.starts_with("PIN terblokir")));
    }

    #[test]
    fn highest_keyword_count_wins() {
        // "kartu debit hilang" also contains "debit hilang": two hits.
        let hit = faq_search("kartu debit hilang, pin terblokir");
        assert!(hit.is_some_and(|h| h.matched_keywords.contains(&"blokir debit")));
    }

    #[test]
    fn unmatched_query_returns_none() {
        assert_eq!(faq_search("jam buka cabang"), None);
    }
}
