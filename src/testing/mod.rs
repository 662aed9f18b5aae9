mod fake_github;

pub use fake_github::FakeGitHub;
