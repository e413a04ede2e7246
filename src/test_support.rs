//! In-memory PDF fixtures for tests

/// Width and height (points) of every fixture page
pub const FIXTURE_PAGE_SIZE: f64 = 300.0;

/// Build a PDF with one page per entry; each non-empty entry is drawn as a
/// single line of 10pt Helvetica near the top of its page.
pub fn minimal_pdf(pages: &[&str]) -> Vec<u8> {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        String::new(), // page tree, filled in once kids are known
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut kids = Vec::new();
    for text in pages {
        let page_id = objects.len() + 1;
        let content_id = page_id + 1;
        kids.push(format!("{} 0 R", page_id));

        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {size} {size}] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>",
            size = FIXTURE_PAGE_SIZE,
            content_id = content_id
        ));

        let content = if text.is_empty() {
            String::new()
        } else {
            format!("BT /F1 10 Tf 20 260 Td ({}) Tj ET", escape(text))
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    objects[1] = format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    );

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
