//! Terminal rendering of the current view.

use colored::Colorize;
use tokclone_application::{AppShell, AuthMode, FeedController, ProfilePage};
use tokclone_core::feed::{AssistantStatus, MediaHandle, PlaybackController};
use tokclone_core::navigation::{DISCOVER_PLACEHOLDER, INBOX_PLACEHOLDER, Tab, View};
use tokclone_infrastructure::SimulatedMedia;

pub fn render(shell: &AppShell<SimulatedMedia>) {
    println!();
    match shell.view() {
        View::Feed => match shell.feed() {
            Some(feed) => render_feed(feed),
            None => println!("{}", "Feed is not mounted".bright_black()),
        },
        View::Discover => println!("{}", DISCOVER_PLACEHOLDER.bright_black()),
        View::Inbox => println!("{}", INBOX_PLACEHOLDER.bright_black()),
        View::Profile(_) => match shell.profile() {
            Some(page) => render_profile(page),
            None => println!("{}", "Profile is not mounted".bright_black()),
        },
        View::Auth => render_auth(shell),
    }
    render_tab_bar(shell.tab());
}

fn render_feed(feed: &FeedController<SimulatedMedia>) {
    println!("{}   {}", "Following".bright_black(), "For You".bold().underline());

    let total = feed.panels().len();
    let Some(panel) = feed.active_panel() else {
        return;
    };
    println!(
        "{}",
        format!("[{}/{}]", feed.active_index() + 1, total).bright_black()
    );
    render_panel(panel);
}

fn render_panel(panel: &PlaybackController<SimulatedMedia>) {
    let video = panel.video();
    let media = panel.media();

    let state = if panel.is_playing() {
        format!("▶ {:.1}s", media.position().as_secs_f64()).green()
    } else {
        "⏸ paused".yellow()
    };
    let sound = if media.is_muted() { "🔇 muted" } else { "🔊 sound on" };
    println!("{}  {}", state, sound.bright_black());
    println!("{}", media.url().bright_black().dimmed());

    println!("{}", format!("@{}", video.username.trim_start_matches('@')).bold());
    println!("{}", video.description);
    println!("{}", format!("♫ {}", video.song).bright_black());

    let heart = if panel.is_liked() { "♥".red() } else { "♡".normal() };
    println!(
        "{} {}   💬 {}   ↪ {}",
        heart,
        panel.displayed_likes(),
        video.comments,
        video.shares
    );

    if panel.assistant_open() {
        render_assistant(panel.assistant());
    }
}

fn render_assistant(status: &AssistantStatus) {
    println!("{}", "── AI Assistant ──".bright_magenta());
    match status {
        AssistantStatus::Idle => {}
        AssistantStatus::Loading => println!("{}", "Thinking...".bright_magenta().italic()),
        AssistantStatus::Ready(result) => {
            println!("{}", result.caption.bright_blue());
            println!("{}", result.hashtags.join(" ").cyan());
            if let Some(analysis) = &result.analysis {
                println!("{} {}", "Why this works:".bold(), analysis);
            }
        }
    }
}

fn render_profile(page: &ProfilePage) {
    let user = &page.user;
    println!("{}", user.username.bold());
    println!("@{}", user.username);
    println!("{}", user.bio);
    println!(
        "{} Following   {} Followers   {} Likes",
        user.stats.following.bold(),
        user.stats.followers.bold(),
        user.stats.likes.bold()
    );

    for row in page.tiles.chunks(3) {
        let line: Vec<String> = row.iter().map(|tile| format!("▶ {:>6}", tile.views)).collect();
        println!("{}", line.join("  "));
    }
    println!("{}", "Type 'logout' to sign out.".bright_black());
}

fn render_auth(shell: &AppShell<SimulatedMedia>) {
    let form = shell.auth_form();
    match form.mode {
        AuthMode::Login => {
            println!("{}", "Log in to TokClone".bold());
            println!("{}", "login <email> <password>".bright_black());
        }
        AuthMode::Register => {
            println!("{}", "Sign up for TokClone".bold());
            println!("{}", "register <username> <email> <password>".bright_black());
        }
    }
    if let Some(error) = form.error() {
        println!("{}", error.red());
    }
}

fn render_tab_bar(selected: Tab) {
    let tabs = [
        (Tab::Feed, "Home"),
        (Tab::Discover, "Discover"),
        (Tab::Inbox, "Inbox"),
        (Tab::Profile, "Profile"),
    ];
    let bar: Vec<String> = tabs
        .iter()
        .map(|(tab, label)| {
            if *tab == selected {
                label.bold().to_string()
            } else {
                label.bright_black().to_string()
            }
        })
        .collect();
    println!();
    println!("{}", bar.join("  │  "));
}
