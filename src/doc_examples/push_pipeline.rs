fn main ()
{
    use ::resumable::{
        pipeline::{Collect, Inspect, MapStage, PipelineBuilder, Retain},
        prelude::*,
    };

    ::tracing_subscriber::fmt()
        .with_max_level(::tracing::Level::DEBUG)
        .init()
    ;

    let sink = Collect::<String>::new();
    let collected = sink.items();
    let pipeline =
        PipelineBuilder::sink(sink)
            .named("collect")
            .stage(|downstream| Retain::new(|line: &String| line.contains("ERROR"), downstream))
            .named("grep")
            .stage(|downstream| Inspect::new(|line: &String| println!("> {}", line), downstream))
            .named("echo")
            .stage(|downstream| MapStage::new(|line: &'static str| line.trim().to_owned(), downstream))
            .named("trim")
            .prime()
            .unwrap()
    ;
    let pushed = pipeline.run([
        "  INFO starting",
        "ERROR disk full ",
        "INFO retrying",
        " ERROR disk still full",
    ]).unwrap();
    for (stage, state) in pipeline.lifecycles() {
        assert_eq!(state, Lifecycle::Cancelled, "{}", stage);
    }
    assert_eq!(pushed, 4);
    assert_eq!(collected.to_vec(), ["ERROR disk full", "ERROR disk still full"]);
}
