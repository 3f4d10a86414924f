use std::fs::File;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use sevendom::{
    Border, Color, Edges, Element, Event, EventTranslator, FieldsetSettings, FieldsetState, Key,
    Overflow, Size, Style, Terminal,
};

fn main() -> std::io::Result<()> {
    let log_file = File::create("fieldset.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let mut translator = EventTranslator::new();

    let mut root = ui();
    let mut fieldset = FieldsetState::new(FieldsetSettings::icon("demo-icon"));
    fieldset.init(&mut root, None);

    loop {
        term.render(&root)?;

        let timeout = if fieldset.animating() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };
        let raw_events = term.poll(Some(timeout))?;
        let events = translator.translate(&raw_events, &root, term.layout());

        for event in &events {
            if let Event::Key {
                key: Key::Char('q') | Key::Escape,
                ..
            } = event
            {
                return Ok(());
            }
        }

        fieldset.process_events(&events, &mut root);
        fieldset.tick(&mut root);
    }
}

fn ui() -> Element {
    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .overflow_y(Overflow::Auto)
        .style(Style::new().background(Color::oklch(0.15, 0.01, 250.0)))
        .padding(Edges::all(1))
        .gap(1)
        .child(Element::text("Click a section title; q quits."))
        .child(section(
            "Arguments",
            "arg 1: 40\narg 2: 2\nexpected: 42",
            false,
        ))
        .child(section(
            "Traceback",
            "assert_equal(actual, expected)\n  left: 41\n  right: 42",
            true,
        ))
}

fn section(title: &str, body: &str, start_hidden: bool) -> Element {
    let parts = FieldsetState::build_item();
    let mut item = parts.item;
    if start_hidden {
        item.add_class(sevendom::fieldset::FIELDSET_DEFAULT_HIDDEN_CLASS);
    }

    FieldsetState::build_container()
        .width(Size::Fill)
        .style(Style::new().border(Border::Rounded))
        .child(
            item.child(
                parts
                    .title
                    .child(Element::text(title).style(Style::new().bold())),
            )
            .child(parts.content.child(Element::text(body))),
        )
}
