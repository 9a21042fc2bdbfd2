use sparse_text_vectorizer::{
    MatrixKind, SimpleTokenizer, TextVectorizer, Tokenizer, VectorMode, VectorizerConfig,
    VectorizerError,
};

const TEXTS: [&str; 3] = [
    "The cat and the cat hate each other.",
    "The dog is the bird.",
    "No, the bird and cat hate other dog.",
];

fn tokenized() -> Vec<Vec<String>> {
    TEXTS.iter().map(|t| SimpleTokenizer.tokenize(t)).collect()
}

fn fitted() -> TextVectorizer {
    TextVectorizer::fit(&tokenized(), VectorizerConfig::default()).unwrap()
}

#[test]
fn vocabulary_is_lexicographic() {
    let v = fitted();
    assert_eq!(
        v.feature_names(),
        vec!["and", "bird", "cat", "dog", "each", "hate", "is", "no", "other", "the"]
    );
    let the = v.vocabulary().index_of("the").unwrap();
    assert_eq!(the, 9);
    assert_eq!(v.vocabulary().df(the), Some(3));
    assert_eq!(v.vocabulary().doc_num(), 3);
}

#[test]
fn first_document_count_and_binary() {
    let v = fitted();
    let docs = tokenized();
    let vocab = v.vocabulary();
    let count = v.transform(&docs[0]);

    let expected = [("the", 2), ("cat", 2), ("and", 1), ("hate", 1), ("each", 1), ("other", 1)];
    assert_eq!(count.nnz(), expected.len());
    for (token, n) in expected {
        assert_eq!(count.get(vocab.index_of(token).unwrap()), Some(n), "token {token}");
    }
    for token in ["bird", "dog", "is", "no"] {
        assert!(!count.contains(vocab.index_of(token).unwrap()));
    }

    let binary = v.transform_with_mode(&docs[0], VectorMode::Binary);
    assert_eq!(binary.indices().collect::<Vec<_>>(), count.indices().collect::<Vec<_>>());
    assert!(binary.iter().all(|(_, value)| value == 1));
}

#[test]
fn token_in_every_document_has_no_weight() {
    let v = fitted();
    let the = v.vocabulary().index_of("the").unwrap();
    assert_eq!(v.idf().get(the), Some(0.0));

    let weighted = v.tfidf(&tokenized()).unwrap();
    assert_eq!(weighted.kind(), MatrixKind::Weighted);
    assert_eq!(weighted.len(), 3);
    for row in &weighted {
        assert!(!row.contains(the));
        assert_eq!(row.len(), 10);
    }
}

#[test]
fn first_document_weights() {
    let v = fitted();
    let vocab = v.vocabulary();
    let row = v.weight_document(&tokenized()[0]).unwrap();

    // 8 tokens; cat: 2/8 * ln(3/2), each: 1/8 * ln(3)
    let cat = row.get(vocab.index_of("cat").unwrap()).unwrap();
    assert!((cat - 0.25 * 1.5f64.ln()).abs() < 1e-12);
    let each = row.get(vocab.index_of("each").unwrap()).unwrap();
    assert!((each - 0.125 * 3.0f64.ln()).abs() < 1e-12);
}

#[test]
fn out_of_vocabulary_document_is_empty_not_error() {
    let v = fitted();
    let vec = v.transform(&["zebra", "quokka", "zebra"]);
    assert!(vec.is_zero());
    assert_eq!(vec.len(), 10);

    // the original length still counts, so weighting succeeds with an empty row
    let row = v.weight_document(&["zebra", "quokka"]).unwrap();
    assert!(row.is_zero());
}

#[test]
fn single_empty_document_fits_but_cannot_be_weighted() {
    let docs: Vec<Vec<String>> = vec![vec![]];
    let (v, counts) = TextVectorizer::<sparse_text_vectorizer::DefaultTFIDFEngine>::fit_transform(
        &docs,
        VectorizerConfig::default(),
    )
    .unwrap();
    assert!(v.vocabulary().is_empty());
    assert_eq!(counts.len(), 1);
    assert_eq!(counts.dim(), 0);
    assert!(counts.row(0).unwrap().is_zero());

    assert_eq!(
        v.weight(&counts, &[0]).unwrap_err(),
        VectorizerError::DegenerateDocument { doc_index: 0 }
    );
    assert_eq!(
        v.tfidf(&docs).unwrap_err(),
        VectorizerError::DegenerateDocument { doc_index: 0 }
    );
}

#[test]
fn empty_corpus_is_rejected() {
    let docs: Vec<Vec<String>> = Vec::new();
    assert_eq!(
        TextVectorizer::<sparse_text_vectorizer::DefaultTFIDFEngine>::fit(&docs, VectorizerConfig::default())
            .unwrap_err(),
        VectorizerError::EmptyCorpus
    );
}

#[test]
fn weight_each_lets_caller_skip_empty_documents() {
    let v = fitted();
    let mut docs = tokenized();
    docs.insert(1, Vec::new());
    let counts = v.transform_many(&docs);
    let lengths: Vec<u64> = docs.iter().map(|d| d.len() as u64).collect();

    let rows = v.weight_each(&counts, &lengths).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1], Err(VectorizerError::DegenerateDocument { doc_index: 1 }));
    let kept: Vec<_> = rows.into_iter().filter_map(Result::ok).collect();
    assert_eq!(kept.len(), 3);
}

#[test]
fn similar_documents_score_higher() {
    let v = fitted();
    let weighted = v.tfidf(&tokenized()).unwrap();
    let (a, b, c) = (&weighted.rows()[0], &weighted.rows()[1], &weighted.rows()[2]);
    // doc 3 shares cat/hate/other/and with doc 1, only bird/dog with doc 2
    assert!(a.cosine_similarity(c) > a.cosine_similarity(b));
    assert!((a.cosine_similarity(a) - 1.0).abs() < 1e-12);
}

#[test]
fn matrix_from_another_vocabulary_is_rejected() {
    let big = fitted();
    let small_docs = vec![vec!["cat", "dog"], vec!["dog"]];
    let small = TextVectorizer::<sparse_text_vectorizer::DefaultTFIDFEngine>::fit(
        &small_docs,
        VectorizerConfig::default(),
    )
    .unwrap();
    let foreign = small.transform_many(&small_docs);
    assert_eq!(foreign.dim(), 2);

    assert_eq!(
        big.weight(&foreign, &[2, 1]).unwrap_err(),
        VectorizerError::DimensionMismatch { expected: 10, actual: 2 }
    );
    let each = big.weight_each(&foreign, &[2, 1]).unwrap_err();
    assert_eq!(each, VectorizerError::DimensionMismatch { expected: 10, actual: 2 });
}

#[test]
fn lengths_shorter_than_counts_are_rejected() {
    let v = fitted();
    let docs = tokenized();
    let counts = v.transform_many(&docs);
    // document 0 has 8 tokens, 2 of them "cat"
    let lengths = [1, docs[1].len() as u64, docs[2].len() as u64];
    assert_eq!(
        v.weight(&counts, &lengths).unwrap_err(),
        VectorizerError::InconsistentDocumentLength {
            doc_index: 0,
            doc_len: 1,
            counted: 8
        }
    );
}
