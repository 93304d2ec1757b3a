//! Extraction of page order and Dublin Core metadata from a volume's hOCR file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use common::page_metadata::{ManifestInput, PageEntry};
use scraper::{Html, Selector};

use crate::error::{ServiceError, ServiceResult};

const SERVICE: &str = "page metadata";
const METADATA_NAMESPACE: &str = "DC.";

pub fn hocr_path(hocr_root: &Path, volume_id: &str, file_name: &str) -> PathBuf {
    hocr_root.join(volume_id).join(file_name)
}

pub async fn load_manifest_input(hocr_root: &Path, volume_id: &str, file_name: &str) -> ServiceResult<ManifestInput> {
    let path = hocr_path(hocr_root, volume_id, file_name);
    tracing::debug!("Reading hOCR document: {}", path.display());
    let html = match tokio::fs::read_to_string(&path).await {
        Ok(html) => html,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ServiceError::VolumeDocumentMissing(volume_id.to_string()));
        }
        Err(e) => {
            return Err(anyhow::Error::from(e)
                .context(format!("reading {}", path.display()))
                .into());
        }
    };
    // html5ever parsing of a whole book is CPU bound
    tokio::task::spawn_blocking(move || parse_hocr(&html))
        .await
        .context("hOCR parser task failed")?
}

pub fn parse_hocr(html: &str) -> ServiceResult<ManifestInput> {
    let document = Html::parse_document(html);
    let meta_selector = selector("meta[name]")?;
    let page_selector = selector("div.ocr_page")?;

    let mut input = ManifestInput::default();
    for meta in document.select(&meta_selector) {
        let Some(name) = meta.value().attr("name") else { continue };
        let Some(key) = name.strip_prefix(METADATA_NAMESPACE) else { continue };
        let content = meta.value().attr("content").unwrap_or_default();
        input.insert_metadata(key, content);
    }

    for page in document.select(&page_selector) {
        let Some(page_id) = page.value().id() else {
            return Err(malformed("ocr_page element without an id".to_string()));
        };
        input.pages.push(PageEntry::new(page_id, page_ordinal(page_id)?));
    }
    Ok(input)
}

/// `page_12` -> 12. Ordinals are 1-based.
pub fn page_ordinal(page_id: &str) -> ServiceResult<u32> {
    let suffix = page_id.rsplit('_').next().unwrap_or(page_id);
    match suffix.parse::<u32>() {
        Ok(ordinal) if ordinal > 0 => Ok(ordinal),
        _ => Err(malformed(format!("page id {page_id} has no 1-based numeric suffix"))),
    }
}

fn selector(css: &'static str) -> ServiceResult<Selector> {
    Selector::parse(css).map_err(|e| ServiceError::Internal(anyhow::anyhow!("bad selector {css}: {e}")))
}

fn malformed(detail: String) -> ServiceError {
    tracing::error!("malformed {} document: {}", SERVICE, detail);
    ServiceError::MalformedUpstreamPayload { service: SERVICE, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOCR: &str = r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <title>hOCR</title>
  <meta http-equiv="Content-Type" content="text/html; charset=utf-8" />
  <meta name="ocr-system" content="google-books" />
  <meta name="DC.title" content="Voyage to Paris" />
  <meta name="DC.creator" content="A. Traveller" />
  <meta name="DC.date" content="1852" />
</head>
<body>
  <div class="ocr_page" id="page_1" title="bbox 0 0 1200 1800"><span class="ocr_line">Title</span></div>
  <div class="ocr_page" id="page_2" title="bbox 0 0 1200 1800"></div>
  <div class="ocr_page" id="page_10" title="bbox 0 0 1200 1800"></div>
</body>
</html>"#;

    #[test]
    fn keeps_only_namespaced_metadata_in_document_order() {
        let input = parse_hocr(HOCR).unwrap();
        let keys = input.metadata.iter().map(|f| f.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["title", "creator", "date"]);
        assert_eq!(input.title(), Some("Voyage to Paris"));
        assert_eq!(input.get_metadata("ocr-system"), None);
    }

    #[test]
    fn pages_in_document_order_with_ordinals() {
        let input = parse_hocr(HOCR).unwrap();
        assert_eq!(
            input.pages,
            vec![
                PageEntry::new("page_1", 1),
                PageEntry::new("page_2", 2),
                PageEntry::new("page_10", 10),
            ]
        );
    }

    #[test]
    fn page_id_without_number_is_malformed() {
        assert!(matches!(page_ordinal("cover"), Err(ServiceError::MalformedUpstreamPayload { .. })));
        assert!(matches!(page_ordinal("page_0"), Err(ServiceError::MalformedUpstreamPayload { .. })));
        assert_eq!(page_ordinal("p_b_7").unwrap(), 7);
    }

    #[tokio::test]
    async fn loads_from_volume_directory() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("vol1")).unwrap();
        std::fs::write(root.path().join("vol1").join("hOCR.html"), HOCR).unwrap();

        let input = load_manifest_input(root.path(), "vol1", "hOCR.html").await.unwrap();
        assert_eq!(input.pages.len(), 3);

        let err = load_manifest_input(root.path(), "vol2", "hOCR.html").await.unwrap_err();
        assert!(matches!(err, ServiceError::VolumeDocumentMissing(v) if v == "vol2"));
    }
}
