//! Property-based tests for log_pipeline using proptest

use log_pipeline::pattern::{CompiledPattern, ConverterRegistry};
use log_pipeline::{
    BufferedDispatcher, Diagnostics, EventContext, FormatSpec, LogEvent, LogLevel, MemoryAppender,
};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel properties
// ============================================================================

proptest! {
    /// LogLevel string conversions roundtrip
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let as_str = level.to_str();
        let parsed: LogLevel = as_str.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// LogLevel ordering matches its numeric discriminants
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }
}

// ============================================================================
// Width spec properties
// ============================================================================

proptest! {
    /// Padding reaches exactly the minimum width and keeps the raw text
    #[test]
    fn test_min_width_pads_to_exact_width(
        raw in "[a-zA-Z0-9 ]{0,20}",
        min in 0usize..40,
        left_align in any::<bool>(),
    ) {
        let spec = FormatSpec { min: Some(min), max: None, left_align };
        let result = spec.apply(&raw);

        let raw_len = raw.chars().count();
        prop_assert_eq!(result.chars().count(), raw_len.max(min));
        if left_align {
            prop_assert!(result.starts_with(&raw));
        } else {
            prop_assert!(result.ends_with(&raw));
        }
    }

    /// Truncation keeps exactly the trailing `max` characters
    #[test]
    fn test_max_width_keeps_trailing_chars(
        raw in "\\PC{0,30}",
        max in 0usize..20,
    ) {
        let spec = FormatSpec { min: None, max: Some(max), left_align: false };
        let result = spec.apply(&raw);

        let raw_chars: Vec<char> = raw.chars().collect();
        if raw_chars.len() > max {
            let expected: String = raw_chars[raw_chars.len() - max..].iter().collect();
            prop_assert_eq!(result, expected);
        } else {
            prop_assert_eq!(result, raw);
        }
    }
}

// ============================================================================
// Pattern compiler properties
// ============================================================================

proptest! {
    /// A pattern with no '%' renders to itself unchanged
    #[test]
    fn test_literal_pattern_round_trip(text in "[^%]{0,64}") {
        let pattern = CompiledPattern::compile(
            &text,
            &ConverterRegistry::new(),
            &Diagnostics::silent(),
        );
        let event = LogEvent::new(LogLevel::Info, "probe");
        prop_assert_eq!(pattern.render(&event), text);
    }

    /// Compiling the same pattern twice yields equivalent node sequences
    #[test]
    fn test_compilation_is_deterministic(
        pattern in "[a-z %.{}0-9-]{0,48}",
    ) {
        let registry = ConverterRegistry::new();
        let diagnostics = Diagnostics::silent();
        let first = CompiledPattern::compile(&pattern, &registry, &diagnostics);
        let second = CompiledPattern::compile(&pattern, &registry, &diagnostics);

        prop_assert_eq!(
            format!("{:?}", first.nodes()),
            format!("{:?}", second.nodes())
        );
    }

    /// "%%" always renders as a single '%' regardless of surroundings
    #[test]
    fn test_escape_property(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}") {
        let source = format!("{}%%{}", prefix, suffix);
        let pattern = CompiledPattern::compile(
            &source,
            &ConverterRegistry::new(),
            &Diagnostics::silent(),
        );
        let event = LogEvent::new(LogLevel::Info, "probe");
        prop_assert_eq!(pattern.render(&event), format!("{}%{}", prefix, suffix));
    }
}

// ============================================================================
// Context properties
// ============================================================================

proptest! {
    /// set/get law: the last value written for a key is the one read
    #[test]
    fn test_context_set_get(
        keys in proptest::collection::vec("[a-z]{1,6}", 1..8),
        value in -1000i64..1000,
    ) {
        let mut ctx = EventContext::new();
        for key in &keys {
            ctx.set(key.clone(), value);
        }
        ctx.set(keys[0].clone(), value + 1);

        prop_assert_eq!(ctx.get(&keys[0]).unwrap().to_string(), (value + 1).to_string());
        // Duplicate keys collapse: length equals distinct key count
        let mut distinct = keys.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(ctx.len(), distinct.len());
    }
}

// ============================================================================
// Lossy buffer properties
// ============================================================================

proptest! {
    /// A lossy buffer of capacity c retains exactly the last min(n, c)
    /// events, in arrival order
    #[test]
    fn test_lossy_retention_law(n in 0usize..24, capacity in 1usize..8) {
        let memory = MemoryAppender::new("memory");
        let probe = memory.clone();
        let engine = BufferedDispatcher::builder()
            .capacity(capacity)
            .lossy(true)
            .appender(memory)
            .build();

        for i in 0..n {
            engine
                .append(LogEvent::new(LogLevel::Info, format!("m{}", i)))
                .unwrap();
        }
        engine.flush().unwrap();

        let expected: Vec<String> = (n.saturating_sub(capacity)..n)
            .map(|i| format!("m{}", i))
            .collect();
        prop_assert_eq!(probe.messages(), expected);
        prop_assert_eq!(
            engine.metrics().discarded_count(),
            n.saturating_sub(capacity) as u64
        );
    }
}
