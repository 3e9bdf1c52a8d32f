use shared_types::{
    CoreBlock, CoreType, RawSearchResponse, ResultRecord, SearchError, ThesisDoc, ThesisResult,
};

/// Fields the backend may replace with a highlighted snippet.
const HIGHLIGHT_TITLE: &str = "title";
const HIGHLIGHT_DESCRIPTION: &str = "description";

/// Turn a raw backend payload into display-ready records.
///
/// Core blocks are visited in backend order and their records concatenated.
/// Blocks of an unrecognized core type are skipped. A document that cannot
/// be read is dropped with a warning; the rest of the batch is kept.
pub fn normalize(raw: RawSearchResponse) -> Result<Vec<ResultRecord>, SearchError> {
    let payload = match raw {
        RawSearchResponse::Error(payload) => return Err(SearchError::from(&payload)),
        RawSearchResponse::Data(payload) => payload,
    };

    let mut records = Vec::new();
    for block in payload.data {
        match CoreType::from_name(&block.core_type) {
            Some(CoreType::Thesis) => records.extend(thesis_records(block)),
            None => {
                tracing::debug!(core = %block.core_type, docs = block.response.docs.len(), "skipping unrecognized core");
            }
        }
    }
    Ok(records)
}

fn thesis_records(mut block: CoreBlock) -> Vec<ResultRecord> {
    let docs = std::mem::take(&mut block.response.docs);
    docs.into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value::<ThesisDoc>(value) {
            Ok(doc) => Some(ResultRecord::Thesis(thesis_result(doc, &block))),
            Err(e) => {
                let err = SearchError::malformed_doc(format!(
                    "{} doc #{position}: {e}",
                    block.core_type
                ));
                tracing::warn!(error = %err, "dropping document");
                None
            }
        })
        .collect()
}

/// Build a thesis record, preferring highlighted title and description
/// snippets over the stored values.
fn thesis_result(doc: ThesisDoc, block: &CoreBlock) -> ThesisResult {
    let title = block
        .snippet(&doc.id, HIGHLIGHT_TITLE)
        .map(str::to_string)
        .or(doc.title)
        .unwrap_or_default();
    let description = block
        .snippet(&doc.id, HIGHLIGHT_DESCRIPTION)
        .map(str::to_string)
        .or(doc.description);

    ThesisResult {
        title,
        description,
        author: doc.author.unwrap_or_default(),
        year_published: doc.yearpub,
        publisher: doc.publisher,
        advisor: doc.advisor,
        language: doc.language,
        file_url: doc.file_url,
        uri: doc.uri.unwrap_or_default(),
        keywords: doc.keywords,
        id: doc.id,
    }
}
