//! Static prompt resources for complaint extraction.

/// System instruction: hard output rules, classification, subcategory hints,
/// priority rules and time-format examples.
pub const EXTRACTION_SYSTEM: &str = "\
You are a bank customer-care assistant for Indonesia. Extract a structured JSON from the user's complaint.

Hard rules:
- Output VALID JSON only (no prose).
- Unknown fields = null.
- category \u{2208} {Tabungan, Giro, Kartu Kredit, Lainnya}.
- Use bahasa Indonesia for subcategory & description.
- preferred_contact \u{2208} {call, chat, null}.
- standby_call_window format: HH:mm-HH:mm (Asia/Jakarta).

Classification rules (very important):
- Jika menyebut: kartu debit / debit / ATM / rekening tabungan / tarik-setor tunai \u{2192} category = Tabungan.
- Jika menyebut: kartu kredit / CC / tagihan/limit/cicilan/chargeback/refund merchant \u{2192} category = Kartu Kredit.
- Jika menyebut: giro / bilyet giro (BG) / cek / inkaso / kliring \u{2192} category = Giro.
- Jika tidak yakin dengan kategori \u{2192} category = null (jangan tebak).

Subcategory hints:
- Tabungan: \"Kartu debit tertelan\", \"Tarik tunai gagal\", \"Saldo tidak sesuai\", \"Kartu debit hilang\", \"PIN terblokir\".
- Kartu Kredit: \"Transaksi tidak dikenali\", \"Tagihan tidak sesuai\", \"Kartu kredit hilang\", \"Kena biaya tahunan\", \"Limit tidak cukup\".
- Giro: \"BG tolak\", \"Setoran cek pending\", \"Inkaso terlambat\".

Priority rules:
- High jika ada kata kunci: \"hilang\", \"dicuri\", \"fraud\", \"transaksi tidak dikenal/tidak dikenali\", \"akses tidak sah/ilegal\".
- Selain itu default Medium (kecuali jelas Low).

Time window:
- Contoh masukan \"13-15\" \u{2192} \"13:00-15:00\"; \"13.30-15.45\" \u{2192} \"13:30-15:45\".";

/// JSON schema shape plus three worked examples, sent ahead of the complaint.
pub const EXTRACTION_SCHEMA_AND_EXAMPLES: &str = r#"Schema:
{
  "full_name": "string|null",
  "account_number": "string|null",
  "category": "Tabungan|Giro|Kartu Kredit|Lainnya|null",
  "subcategory": "string|null",
  "description": "string",
  "priority": "Low|Medium|High",
  "preferred_contact": "call|chat|null",
  "standby_call_window": "string|null",
  "attachments": []
}

Examples:
Input:
"Halo, kartu debit saya tertelan di ATM BNI Semarang semalam. Rekening 123456789012. Saya standby telepon 13-15."
Output:
{
  "full_name": null,
  "account_number": "123456789012",
  "category": "Tabungan",
  "subcategory": "Kartu debit tertelan",
  "description": "Kartu debit tertelan di ATM BNI Semarang semalam.",
  "priority": "Medium",
  "preferred_contact": "call",
  "standby_call_window": "13:00-15:00",
  "attachments": []
}

Input:
"Saya keberatan tagihan kartu kredit bulan ini, ada transaksi tidak saya kenal."
Output:
{
  "full_name": null,
  "account_number": null,
  "category": "Kartu Kredit",
  "subcategory": "Transaksi tidak dikenali",
  "description": "Keberatan tagihan kartu kredit, ada transaksi tidak dikenali.",
  "priority": "High",
  "preferred_contact": null,
  "standby_call_window": null,
  "attachments": []
}

Input:
"BG saya ditolak, tolong cek statusnya."
Output:
{
  "full_name": null,
  "account_number": null,
  "category": "Giro",
  "subcategory": "BG tolak",
  "description": "Bilyet giro ditolak dan perlu pengecekan status.",
  "priority": "Medium",
  "preferred_contact": null,
  "standby_call_window": null,
  "attachments": []
}"#;

/// User message for one complaint: schema, examples, then the text in
/// triple quotes.
#[must_use]
pub fn extraction_user_message(text: &str) -> String {
    format!(
        "{EXTRACTION_SCHEMA_AND_EXAMPLES}\n\nUser complaint (free text):\n\"\"\"{text}\"\"\"\n\nOutput only the JSON object, nothing else."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_wraps_text_in_triple_quotes() {
        let message = extraction_user_message("kartu saya hilang");
        assert!(message.starts_with("Schema:"));
        assert!(message.contains("\"\"\"kartu saya hilang\"\"\""));
        assert!(message.ends_with("Output only the JSON object, nothing else."));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn example_outputs_are_valid_json() {
        let outputs: Vec<serde_json::Value> = EXTRACTION_SCHEMA_AND_EXAMPLES
            .split("Output:\n")
            .skip(1)
            .map(|chunk| {
                let block = chunk.split("\n\nInput:").next().unwrap_or(chunk);
                serde_json::from_str(block).expect("example output should parse")
            })
            .collect();
        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[1]["category"], "Kartu Kredit");
    }
}
