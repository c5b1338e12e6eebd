#![no_main]
use libfuzzer_sys::fuzz_target;
use rdfprint_api::parser::StatementParser;
use rdfprint_api::store::Model;
use rdfprint_api::streaming::StreamingConsumer;
use rdfprint_xml::RdfXmlParser;
use std::io::sink;

fuzz_target!(|data: &[u8]| {
    if let Ok(parser) = RdfXmlParser::new(data, "http://example.com/") {
        let mut model = Model::new();
        let mut consumer = StreamingConsumer::new(&mut model, sink());
        let _ = parser.with_robust_mode(true).parse_into(&mut consumer);
        drop(consumer);
        assert!(model.is_empty());
    }
});
