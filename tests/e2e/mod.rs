// End-to-end tests for the VoiceForge relay
//
// Each test boots the real router on an ephemeral port and, where needed, an
// in-process mock of the upstream voice-cloning service. The mock picks its
// behaviour from the `text` field it receives:
//
// - "boom"        -> 500 with body "boom"
// - "long-error"  -> 500 with a 500 character body
// - "teapot"      -> 418 with an empty body
// - "hang"        -> sleeps past the relay timeout
// - "stall"       -> 200 headers and `RIFF`, then sleeps past the relay timeout
// - "stall-error" -> 500 headers and part of a body, then sleeps the same way
// - anything else -> 200 with `MOCK_AUDIO`
//
// No test shares state with another, so they run in parallel.

mod helpers;
