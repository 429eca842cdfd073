//! WebView2 initialization.

use log::{debug, error, info};
use notedb_core::{ShellEvent, WindowSlot};
use webview2_com::Microsoft::Web::WebView2::Win32::{
    CreateCoreWebView2Environment, ICoreWebView2, ICoreWebView2Controller,
    ICoreWebView2Environment, ICoreWebView2NewWindowRequestedEventArgs,
    ICoreWebView2WebMessageReceivedEventArgs,
};
use webview2_com::{
    AddScriptToExecuteOnDocumentCreatedCompletedHandler,
    CreateCoreWebView2ControllerCompletedHandler, CreateCoreWebView2EnvironmentCompletedHandler,
    NavigationCompletedEventHandler, NewWindowRequestedEventHandler,
    WebMessageReceivedEventHandler,
};
use windows::Win32::Foundation::HWND;
use windows::core::{HSTRING, PWSTR};

use super::WebView;
use super::bridge::{handle_webview_message, take_pwstr};
use crate::app;
use crate::platform::window::attach_webview;
use crate::templates::PRELOAD_JS_W;

/// Starts hosting `url` in `hwnd`.
///
/// WebView2 creation is async because it may need to start the runtime; the window's
/// slot gets [`ShellEvent::ContentReady`] once the first navigation completes.
pub fn init_webview(hwnd: HWND, slot: WindowSlot, url: String) {
    let created = unsafe {
        CreateCoreWebView2Environment(&CreateCoreWebView2EnvironmentCompletedHandler::create(
            Box::new(move |_error, env| {
                match env {
                    Some(env) => create_controller(hwnd, slot, url, env),
                    None => content_unavailable(slot, "no WebView2 environment"),
                }
                Ok(())
            }),
        ))
    };
    if let Err(e) = created {
        content_unavailable(slot, &e.message());
    }
}

/// Lets a window waiting on its content show up blank instead of never.
fn content_unavailable(slot: WindowSlot, reason: &str) {
    error!("WebView2 unavailable for {} window: {}", slot, reason);
    app::dispatch(ShellEvent::ContentReady(slot));
}

fn create_controller(hwnd: HWND, slot: WindowSlot, url: String, env: ICoreWebView2Environment) {
    let created = unsafe {
        env.CreateCoreWebView2Controller(
            hwnd,
            &CreateCoreWebView2ControllerCompletedHandler::create(Box::new(
                move |_error, controller| {
                    let Some(controller) = controller else {
                        content_unavailable(slot, "controller creation failed");
                        return Ok(());
                    };
                    let Some(webview) = setup_webview(&controller, slot) else {
                        content_unavailable(slot, "no CoreWebView2");
                        return Ok(());
                    };

                    let _ = controller.SetIsVisible(true);
                    let _ = webview.Navigate(&HSTRING::from(url.as_str()));
                    info!("{} window navigating to {}", slot, url);

                    attach_webview(
                        hwnd,
                        WebView {
                            controller,
                            webview,
                        },
                    );
                    Ok(())
                },
            )),
        )
    };
    if let Err(e) = created {
        content_unavailable(slot, &e.message());
    }
}

fn setup_webview(controller: &ICoreWebView2Controller, slot: WindowSlot) -> Option<ICoreWebView2> {
    unsafe {
        let webview = controller.CoreWebView2().ok()?;

        if let Ok(settings) = webview.Settings() {
            let _ = settings.SetAreDevToolsEnabled(cfg!(debug_assertions));
            let _ = settings.SetIsStatusBarEnabled(false);
        }

        let _ = webview.AddScriptToExecuteOnDocumentCreated(
            PRELOAD_JS_W,
            &AddScriptToExecuteOnDocumentCreatedCompletedHandler::create(Box::new(
                |_error, _id| Ok(()),
            )),
        );

        let mut token = 0i64;
        let _ = webview.add_NavigationCompleted(
            &NavigationCompletedEventHandler::create(Box::new(move |_webview, _args| {
                app::dispatch(ShellEvent::ContentReady(slot));
                Ok(())
            })),
            &mut token,
        );

        // Links that want a new window open in place instead.
        let _ = webview.add_NewWindowRequested(
            &NewWindowRequestedEventHandler::create(Box::new(
                move |sender: Option<ICoreWebView2>,
                      args: Option<ICoreWebView2NewWindowRequestedEventArgs>| {
                    let (Some(sender), Some(args)) = (sender, args) else {
                        return Ok(());
                    };
                    let mut uri = PWSTR::null();
                    args.Uri(&mut uri)?;
                    let uri = take_pwstr(uri);
                    args.SetHandled(true)?;
                    debug!("{} window opening {} in place", slot, uri);
                    sender.Navigate(&HSTRING::from(uri))?;
                    Ok(())
                },
            )),
            &mut token,
        );

        let _ = webview.add_WebMessageReceived(
            &WebMessageReceivedEventHandler::create(Box::new(
                move |_webview, args: Option<ICoreWebView2WebMessageReceivedEventArgs>| {
                    let Some(args) = args else { return Ok(()) };
                    let mut message = PWSTR::null();
                    if args.WebMessageAsJson(&mut message).is_err() || message.is_null() {
                        return Ok(());
                    }
                    handle_webview_message(&take_pwstr(message), slot);
                    Ok(())
                },
            )),
            &mut token,
        );

        Some(webview)
    }
}
