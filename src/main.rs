mod api;
mod model;
mod session;
mod validate;

use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlInputElement, InputEvent};
use yew::prelude::*;

use api::{ApiClient, NewInstallment};
use model::{DashboardStats, InstallmentRecord};
use session::{use_session, SessionProvider};

#[derive(Clone, PartialEq)]
enum ListState {
    Idle,
    Loading,
    Ready,
    Empty,
    Failed(String),
}

#[derive(Clone, Copy, PartialEq)]
enum StatIcon {
    Users,
    Chart,
    Money,
    Alert,
}

fn notify(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <SessionProvider>
            <Root />
        </SessionProvider>
    }
}

/// Route guard: the manage view renders only with a session, the login view
/// only without one. Re-evaluated whenever session state changes.
#[function_component(Root)]
fn root() -> Html {
    let session = use_session();

    if session.user_id().is_some() {
        html! { <ManagePage /> }
    } else {
        html! { <LoginPage /> }
    }
}

#[function_component(LoginPage)]
fn login_page() -> Html {
    let session = use_session();
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let touched_username = use_state(|| false);
    let touched_password = use_state(|| false);
    let show_password = use_state(|| false);
    let submit_error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let username_error = if *touched_username {
        validate::username_error(&username)
    } else {
        None
    };
    let password_error = if *touched_password {
        validate::password_error(&password)
    } else {
        None
    };

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };
    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };
    let on_username_blur = {
        let touched_username = touched_username.clone();
        Callback::from(move |_: FocusEvent| touched_username.set(true))
    };
    let on_password_blur = {
        let touched_password = touched_password.clone();
        Callback::from(move |_: FocusEvent| touched_password.set(true))
    };
    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_| show_password.set(!*show_password))
    };

    let on_submit = {
        let session = session.clone();
        let username = username.clone();
        let password = password.clone();
        let touched_username = touched_username.clone();
        let touched_password = touched_password.clone();
        let submit_error = submit_error.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            touched_username.set(true);
            touched_password.set(true);

            let username_val = (*username).clone();
            let password_val = (*password).clone();
            if validate::username_error(&username_val).is_some()
                || validate::password_error(&password_val).is_some()
            {
                return;
            }

            loading.set(true);
            submit_error.set(None);

            let session = session.clone();
            let submit_error = submit_error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match ApiClient::new().login(&username_val, &password_val).await {
                    Ok(Some(person_id)) => {
                        log::info!("signed in as person {}", person_id);
                        session.login(person_id);
                    }
                    Ok(None) => {
                        log::error!("login response carried no person id");
                        submit_error.set(Some(
                            "Sign-in succeeded but the server returned no account. Please try again."
                                .to_string(),
                        ));
                    }
                    Err(err) => {
                        log::error!("login failed: {}", err);
                        submit_error.set(Some(format!("Could not sign in: {}", err)));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gradient-to-br from-blue-50 via-indigo-50 to-purple-50 p-4">
            <div class="w-full max-w-md">
                <div class="bg-white rounded-3xl shadow-2xl p-8 md:p-10 space-y-8 border border-gray-100">
                    <div class="text-center space-y-4">
                        <div class="flex justify-center">
                            <div class="w-20 h-20 bg-blue-600 rounded-2xl flex items-center justify-center shadow-xl text-white">
                                { icon_money() }
                            </div>
                        </div>
                        <div class="space-y-2">
                            <h1 class="text-3xl font-bold text-gray-800">{"InstallmentPlus"}</h1>
                            <p class="text-gray-600 text-sm">{"Sign in to manage installments and payments"}</p>
                        </div>
                    </div>

                    <form class="space-y-6" onsubmit={on_submit}>
                        <div class="space-y-2">
                            <label for="username" class="block text-sm font-semibold text-gray-700">{"Username"}</label>
                            <div class="relative">
                                <input
                                    id="username"
                                    type="text"
                                    placeholder="Enter your username"
                                    value={(*username).clone()}
                                    oninput={on_username_input}
                                    onblur={on_username_blur}
                                    class={classes!(
                                        "w-full", "px-4", "py-3", "pl-11", "rounded-xl", "border-2", "outline-none", "transition-all", "text-gray-800",
                                        if username_error.is_some() { "border-red-500 bg-red-50" } else { "border-gray-300 focus:border-blue-600 focus:bg-blue-50" }
                                    )}
                                />
                                <span class="absolute left-3 top-1/2 -translate-y-1/2 text-gray-400">{ icon_user() }</span>
                            </div>
                            if let Some(msg) = username_error {
                                <p class="text-red-500 text-sm mt-1">{ msg }</p>
                            }
                        </div>

                        <div class="space-y-2">
                            <label for="password" class="block text-sm font-semibold text-gray-700">{"Password"}</label>
                            <div class="relative">
                                <input
                                    id="password"
                                    type={if *show_password { "text" } else { "password" }}
                                    placeholder="Enter your password"
                                    value={(*password).clone()}
                                    oninput={on_password_input}
                                    onblur={on_password_blur}
                                    class={classes!(
                                        "w-full", "px-4", "py-3", "pl-11", "pr-11", "rounded-xl", "border-2", "outline-none", "transition-all", "text-gray-800",
                                        if password_error.is_some() { "border-red-500 bg-red-50" } else { "border-gray-300 focus:border-blue-600 focus:bg-blue-50" }
                                    )}
                                />
                                <span class="absolute left-3 top-1/2 -translate-y-1/2 text-gray-400">{ icon_lock() }</span>
                                <button
                                    type="button"
                                    onclick={toggle_password}
                                    class="absolute right-3 top-1/2 -translate-y-1/2 text-gray-500 hover:text-gray-700 transition-colors"
                                >
                                    { if *show_password { icon_eye_off() } else { icon_eye() } }
                                </button>
                            </div>
                            if let Some(msg) = password_error {
                                <p class="text-red-500 text-sm mt-1">{ msg }</p>
                            }
                        </div>

                        if let Some(msg) = &*submit_error {
                            <div class="text-sm text-red-600 bg-red-50 border border-red-100 rounded-xl p-3">{ msg.clone() }</div>
                        }

                        <button
                            type="submit"
                            disabled={*loading}
                            class="w-full bg-blue-600 text-white py-4 rounded-xl font-bold text-lg shadow-lg hover:bg-blue-700 transition-all disabled:opacity-70 disabled:cursor-not-allowed"
                        >
                            { if *loading { "Signing in..." } else { "Sign in" } }
                        </button>
                    </form>
                </div>

                <p class="text-center text-gray-600 text-sm mt-6">{"© 2025 InstallmentPlus"}</p>
            </div>
        </div>
    }
}

#[function_component(ManagePage)]
fn manage_page() -> Html {
    let session = use_session();
    let show_add = use_state(|| false);
    let refresh_trigger = use_state(|| 0u32);

    let open_add = {
        let show_add = show_add.clone();
        Callback::from(move |_| show_add.set(true))
    };
    let close_add = {
        let show_add = show_add.clone();
        Callback::from(move |_: ()| show_add.set(false))
    };
    let on_created = {
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |_: ()| refresh_trigger.set(*refresh_trigger + 1))
    };
    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| session.logout(None))
    };

    html! {
        <section class="py-10 bg-gradient-to-br from-blue-50 via-indigo-50 to-purple-50 min-h-screen">
            <div class="max-w-7xl mx-auto px-4">
                <div class="flex flex-col md:flex-row items-center justify-between gap-4 mb-8">
                    <div class="flex items-center gap-4">
                        <div class="w-14 h-14 bg-blue-600 rounded-xl flex items-center justify-center text-white shadow-lg">
                            { icon_money() }
                        </div>
                        <div>
                            <h2 class="text-2xl font-bold text-gray-800">{"InstallmentPlus"}</h2>
                            <p class="text-gray-500 text-sm">{"Installment & payment manager"}</p>
                        </div>
                    </div>

                    <div class="flex items-center gap-3">
                        <button
                            onclick={open_add}
                            class="flex items-center gap-2 bg-blue-600 text-white px-6 py-3 rounded-xl font-semibold hover:bg-blue-700 transition-all shadow-lg active:scale-95"
                        >
                            { icon_plus() }
                            <span>{"New installment"}</span>
                        </button>
                        <button
                            onclick={on_logout}
                            class="flex items-center gap-2 bg-white text-gray-600 px-4 py-3 rounded-xl font-semibold border border-gray-200 hover:bg-gray-50 transition-all"
                        >
                            { icon_log_out() }
                            <span class="hidden sm:inline">{"Log out"}</span>
                        </button>
                    </div>
                </div>

                <Installments refresh_trigger={*refresh_trigger} />

                <AddInstallmentModal is_open={*show_add} on_close={close_add} on_success={on_created} />
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct InstallmentsProps {
    refresh_trigger: u32,
}

#[function_component(Installments)]
fn installments(props: &InstallmentsProps) -> Html {
    let session = use_session();
    let records = use_state(Vec::<InstallmentRecord>::new);
    let stats = use_state(DashboardStats::default);
    let list_state = use_state(|| ListState::Idle);

    // Payment modal state
    let payment_target = use_state(|| None::<i64>);
    let payment_amount = use_state(|| "".to_string());
    let payment_error = use_state(|| None::<&'static str>);
    let payment_loading = use_state(|| false);

    // Receipt preview state
    let preview_image = use_state(|| None::<String>);

    let fetch = {
        let records = records.clone();
        let stats = stats.clone();
        let list_state = list_state.clone();
        let user_id = session.user_id();

        Callback::from(move |_: ()| {
            // No fetch without a signed-in user.
            let user_id = match user_id {
                Some(id) => id,
                None => return,
            };

            let records = records.clone();
            let stats = stats.clone();
            let list_state = list_state.clone();
            list_state.set(ListState::Loading);

            spawn_local(async move {
                match ApiClient::new().installment_requests(user_id).await {
                    Ok(list) if list.is_empty() => {
                        records.set(Vec::new());
                        stats.set(DashboardStats::default());
                        list_state.set(ListState::Empty);
                    }
                    Ok(list) => {
                        stats.set(DashboardStats::from_records(&list));
                        records.set(list);
                        list_state.set(ListState::Ready);
                    }
                    // An account with no installments reports 404; that is a
                    // valid zero-record state, not an error.
                    Err(err) if err.is_not_found() => {
                        records.set(Vec::new());
                        stats.set(DashboardStats::default());
                        list_state.set(ListState::Empty);
                    }
                    Err(err) => {
                        log::error!("failed to load installments: {}", err);
                        list_state.set(ListState::Failed(err.to_string()));
                    }
                }
            });
        })
    };

    {
        let fetch = fetch.clone();
        use_effect_with_deps(
            move |_| {
                fetch.emit(());
                || ()
            },
            (session.user_id(), props.refresh_trigger),
        );
    }

    let on_retry = {
        let fetch = fetch.clone();
        Callback::from(move |_| fetch.emit(()))
    };

    let close_payment = {
        let payment_target = payment_target.clone();
        let payment_amount = payment_amount.clone();
        let payment_error = payment_error.clone();
        Callback::from(move |_| {
            payment_target.set(None);
            payment_amount.set("".to_string());
            payment_error.set(None);
        })
    };

    let on_payment_input = {
        let payment_amount = payment_amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            payment_amount.set(input.value());
        })
    };

    let on_submit_payment = {
        let payment_target = payment_target.clone();
        let payment_amount = payment_amount.clone();
        let payment_error = payment_error.clone();
        let payment_loading = payment_loading.clone();
        let fetch = fetch.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let installment_id = match *payment_target {
                Some(id) => id,
                None => return,
            };

            let amount = payment_amount.trim().to_string();
            if let Some(msg) = validate::payment_amount_error(&amount) {
                payment_error.set(Some(msg));
                return;
            }
            payment_error.set(None);
            payment_loading.set(true);

            let payment_target = payment_target.clone();
            let payment_amount = payment_amount.clone();
            let payment_loading = payment_loading.clone();
            let fetch = fetch.clone();
            spawn_local(async move {
                match ApiClient::new().add_payment(installment_id, &amount).await {
                    Ok(()) => {
                        payment_loading.set(false);
                        payment_target.set(None);
                        payment_amount.set("".to_string());
                        notify("Payment recorded.");
                        // Re-fetch instead of patching locally so the shown
                        // balances always reflect the server's ledger.
                        fetch.emit(());
                    }
                    Err(err) => {
                        log::error!("failed to record payment: {}", err);
                        payment_loading.set(false);
                        notify(&format!("Could not record the payment: {}", err));
                    }
                }
            });
        })
    };

    let dashboard = [
        (
            "Total customers",
            format_with_commas(stats.total_customers as i64),
            StatIcon::Users,
            "text-blue-500",
            "bg-blue-50",
        ),
        (
            "Active customers",
            format_with_commas(stats.active_customers as i64),
            StatIcon::Chart,
            "text-yellow-500",
            "bg-yellow-50",
        ),
        (
            "Total collected",
            format_amount(stats.total_collected),
            StatIcon::Money,
            "text-green-500",
            "bg-green-50",
        ),
        (
            "Outstanding",
            format_amount(stats.remaining_amount),
            StatIcon::Alert,
            "text-red-500",
            "bg-red-50",
        ),
    ];

    html! {
        <div class="mt-2 space-y-8">
            <div class="grid lg:grid-cols-4 md:grid-cols-2 grid-cols-1 gap-5">
                { for dashboard.iter().map(|(title, value, icon, color, bg)| html! {
                    <StatCard title={*title} value={value.clone()} icon={*icon} color={*color} bg={*bg} />
                }) }
            </div>

            {
                match &*list_state {
                    ListState::Idle | ListState::Loading => html! {
                        <div class="flex flex-col items-center justify-center py-20">
                            <div class="w-12 h-12 border-4 border-blue-600 border-t-transparent rounded-full animate-spin mb-4"></div>
                            <p class="text-gray-500 font-medium">{"Loading installments..."}</p>
                        </div>
                    },
                    ListState::Failed(message) => html! {
                        <div class="text-center py-12 bg-red-50 rounded-2xl border border-red-100">
                            <p class="text-red-500 font-medium">{ format!("Could not load installments: {}", message) }</p>
                            <button onclick={on_retry} class="mt-4 text-blue-600 hover:underline font-medium">{"Retry"}</button>
                        </div>
                    },
                    ListState::Empty => html! {
                        <div class="text-center py-20 bg-white rounded-3xl border border-dashed border-gray-300">
                            <div class="w-20 h-20 bg-gray-50 rounded-full flex items-center justify-center mx-auto mb-4 text-gray-400">
                                { icon_users() }
                            </div>
                            <h3 class="text-xl font-bold text-gray-800 mb-2">{"No installments yet"}</h3>
                            <p class="text-gray-500">{"Add your first installment to start tracking payments."}</p>
                        </div>
                    },
                    ListState::Ready => html! {
                        <div class="grid lg:grid-cols-3 md:grid-cols-2 grid-cols-1 gap-6">
                            { for records.iter().map(|record| {
                                let progress = record.progress_percent();
                                let open_payment = {
                                    let payment_target = payment_target.clone();
                                    let installment_id = record.installment_id;
                                    Callback::from(move |_| payment_target.set(Some(installment_id)))
                                };
                                let open_preview = record.receipt_image().map(|url| {
                                    let preview_image = preview_image.clone();
                                    let url = url.to_string();
                                    Callback::from(move |_| preview_image.set(Some(url.clone())))
                                });

                                html! {
                                    <div key={record.installment_id} class="bg-white rounded-2xl shadow-sm border border-gray-200 overflow-hidden hover:shadow-lg transition-all">
                                        <div class="p-6">
                                            <div class="flex justify-between items-start mb-6">
                                                <div>
                                                    <h3 class="text-lg font-bold text-gray-900">{ &record.client_name }</h3>
                                                    <div class="flex items-center gap-2 text-gray-500 text-sm mt-2">
                                                        <span class="text-blue-600">{ icon_phone() }</span>
                                                        <span class="font-medium">{ &record.phone_number }</span>
                                                    </div>
                                                </div>
                                                <span class="bg-blue-50 text-blue-600 text-xs px-3 py-1.5 rounded-full font-bold border border-blue-100">
                                                    { &record.advice_name }
                                                </span>
                                            </div>

                                            <div class="mb-6">
                                                <div class="flex justify-between text-sm mb-2">
                                                    <span class="text-gray-600 font-medium">{"Repayment"}</span>
                                                    <span class="font-bold text-blue-600">{ format!("{}%", progress.round() as i64) }</span>
                                                </div>
                                                <div class="w-full bg-gray-100 rounded-full h-3 overflow-hidden">
                                                    <div
                                                        class={if progress >= 100.0 { "h-3 rounded-full bg-green-500" } else { "h-3 rounded-full bg-blue-600" }}
                                                        style={format!("width: {}%", progress)}
                                                    ></div>
                                                </div>
                                            </div>

                                            <div class="grid grid-cols-2 gap-3 text-sm mb-6 bg-gray-50 p-4 rounded-xl border border-gray-100">
                                                <div>
                                                    <p class="text-gray-500 text-xs mb-1">{"Total"}</p>
                                                    <p class="font-bold text-gray-900">{ format_amount(record.total_amount) }</p>
                                                </div>
                                                <div>
                                                    <p class="text-gray-500 text-xs mb-1">{"Paid"}</p>
                                                    <p class="font-bold text-green-600">{ format_amount(record.paid_amount) }</p>
                                                </div>
                                                <div>
                                                    <p class="text-gray-500 text-xs mb-1">{"Remaining"}</p>
                                                    <p class="font-bold text-red-500">{ format_amount(record.remaining_amount) }</p>
                                                </div>
                                                <div>
                                                    <p class="text-gray-500 text-xs mb-1">{"Per installment"}</p>
                                                    <p class="font-bold text-gray-900">
                                                        { record.installment_value().map(format_amount).unwrap_or_else(|| "—".to_string()) }
                                                    </p>
                                                </div>
                                            </div>

                                            <div class="flex gap-3">
                                                if let Some(on_preview) = open_preview {
                                                    <button
                                                        onclick={on_preview}
                                                        class="flex-1 bg-gray-100 text-gray-700 py-3 rounded-xl text-sm font-bold hover:bg-gray-200 transition-all flex items-center justify-center gap-2"
                                                    >
                                                        { icon_image() }
                                                        <span class="hidden sm:inline">{"Receipt"}</span>
                                                    </button>
                                                }

                                                if record.is_settled() {
                                                    <span class="flex-1 flex items-center justify-center gap-2 py-3 rounded-xl text-sm font-bold bg-green-100 text-green-700">
                                                        {"Paid in full"}
                                                    </span>
                                                } else {
                                                    <button
                                                        onclick={open_payment}
                                                        class="flex-1 flex items-center justify-center gap-2 py-3 rounded-xl text-sm font-bold bg-blue-600 text-white hover:bg-blue-700 transition-all shadow-lg"
                                                    >
                                                        { icon_cash() }
                                                        <span>{"Record payment"}</span>
                                                    </button>
                                                }
                                            </div>
                                        </div>
                                    </div>
                                }
                            }) }
                        </div>
                    },
                }
            }

            if payment_target.is_some() {
                <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
                    <div class="absolute inset-0 bg-black/40 backdrop-blur-sm" onclick={close_payment.clone()}></div>
                    <div class="relative bg-white rounded-2xl w-full max-w-md shadow-2xl">
                        <div class="p-5 border-b border-gray-100 flex justify-between items-center">
                            <h3 class="text-xl font-bold text-gray-800">{"Record a payment"}</h3>
                            <button
                                onclick={close_payment.clone()}
                                class="p-2 hover:bg-gray-100 text-gray-400 hover:text-gray-600 rounded-full transition-colors"
                            >
                                { icon_close() }
                            </button>
                        </div>
                        <form onsubmit={on_submit_payment} class="p-6 space-y-5">
                            <div class="space-y-2">
                                <label class="block text-sm font-medium text-gray-700">{"Amount paid"}</label>
                                <div class="relative">
                                    <input
                                        type="text"
                                        inputmode="decimal"
                                        placeholder="0.00"
                                        value={(*payment_amount).clone()}
                                        oninput={on_payment_input}
                                        class="w-full p-4 rounded-xl border border-gray-200 focus:border-blue-600 outline-none text-xl font-bold text-gray-800 transition-all pr-14"
                                    />
                                    <span class="absolute right-4 top-1/2 -translate-y-1/2 text-gray-400 font-medium">{"EGP"}</span>
                                </div>
                                if let Some(msg) = *payment_error {
                                    <p class="text-red-500 text-sm">{ msg }</p>
                                }
                            </div>
                            <button
                                type="submit"
                                disabled={*payment_loading}
                                class="w-full bg-green-600 text-white py-3.5 rounded-xl font-bold text-lg hover:bg-green-700 transition-all disabled:opacity-70 disabled:cursor-not-allowed"
                            >
                                { if *payment_loading { "Recording..." } else { "Confirm payment" } }
                            </button>
                        </form>
                    </div>
                </div>
            }

            if let Some(url) = &*preview_image {
                <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
                    <div
                        class="absolute inset-0 bg-black/80 backdrop-blur-md"
                        onclick={{
                            let preview_image = preview_image.clone();
                            Callback::from(move |_| preview_image.set(None))
                        }}
                    ></div>
                    <div class="relative bg-white p-2 rounded-2xl max-w-4xl w-full max-h-[90vh] shadow-2xl flex flex-col">
                        <div class="absolute top-4 right-4 z-10">
                            <button
                                onclick={{
                                    let preview_image = preview_image.clone();
                                    Callback::from(move |_| preview_image.set(None))
                                }}
                                class="bg-black/50 hover:bg-black/70 text-white p-2 rounded-full transition-all"
                            >
                                { icon_close() }
                            </button>
                        </div>
                        <div class="flex-1 overflow-hidden rounded-xl bg-gray-100 flex items-center justify-center">
                            <img src={url.clone()} alt="Receipt" class="max-w-full max-h-[85vh] object-contain" />
                        </div>
                    </div>
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AddInstallmentModalProps {
    is_open: bool,
    on_close: Callback<()>,
    on_success: Callback<()>,
}

#[function_component(AddInstallmentModal)]
fn add_installment_modal(props: &AddInstallmentModalProps) -> Html {
    let session = use_session();
    let client_name = use_state(|| "".to_string());
    let phone_number = use_state(|| "".to_string());
    let address = use_state(|| "".to_string());
    let advice_name = use_state(|| "".to_string());
    let installment_count = use_state(|| "".to_string());
    let total_amount = use_state(|| "".to_string());
    let image = use_state(|| None::<web_sys::File>);
    let form_error = use_state(|| None::<&'static str>);
    let saving = use_state(|| false);

    if !props.is_open {
        return html! {};
    }

    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };
    // Digits-only fields reject the offending keystroke by restoring the
    // previous value.
    let digits_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            if validate::is_digits(&value) {
                state.set(value);
            } else {
                input.set_value(state.as_str());
            }
        })
    };
    let on_amount_input = {
        let total_amount = total_amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            if validate::is_decimal(&value) {
                total_amount.set(value);
            } else {
                input.set_value(total_amount.as_str());
            }
        })
    };
    let on_file_change = {
        let image = image.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            image.set(input.files().and_then(|files| files.get(0)));
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let on_submit = {
        let session = session.clone();
        let client_name = client_name.clone();
        let phone_number = phone_number.clone();
        let address = address.clone();
        let advice_name = advice_name.clone();
        let installment_count = installment_count.clone();
        let total_amount = total_amount.clone();
        let image = image.clone();
        let form_error = form_error.clone();
        let saving = saving.clone();
        let on_close = props.on_close.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let user_id = match session.user_id() {
                Some(id) => id,
                None => return,
            };

            let form = NewInstallment {
                client_name: client_name.trim().to_string(),
                phone_number: phone_number.trim().to_string(),
                address: address.trim().to_string(),
                advice_name: advice_name.trim().to_string(),
                installment_count: installment_count.trim().to_string(),
                total_amount: total_amount.trim().to_string(),
                image: (*image).clone(),
            };
            if form.client_name.is_empty()
                || form.phone_number.is_empty()
                || form.address.is_empty()
                || form.advice_name.is_empty()
                || form.installment_count.is_empty()
                || form.total_amount.is_empty()
            {
                form_error.set(Some("Please complete all fields."));
                return;
            }

            form_error.set(None);
            saving.set(true);

            let client_name = client_name.clone();
            let phone_number = phone_number.clone();
            let address = address.clone();
            let advice_name = advice_name.clone();
            let installment_count = installment_count.clone();
            let total_amount = total_amount.clone();
            let image = image.clone();
            let saving = saving.clone();
            let on_close = on_close.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                match ApiClient::new().save_installment_request(user_id, &form).await {
                    Ok(()) => {
                        saving.set(false);
                        client_name.set("".to_string());
                        phone_number.set("".to_string());
                        address.set("".to_string());
                        advice_name.set("".to_string());
                        installment_count.set("".to_string());
                        total_amount.set("".to_string());
                        image.set(None);
                        on_success.emit(());
                        on_close.emit(());
                    }
                    Err(err) => {
                        log::error!("failed to save installment request: {}", err);
                        saving.set(false);
                        notify(&format!("Could not save the installment: {}", err));
                    }
                }
            });
        })
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
            <div class="absolute inset-0 bg-black/40 backdrop-blur-sm" onclick={on_close.clone()}></div>

            <div class="relative bg-white rounded-2xl w-full max-w-2xl max-h-[90vh] overflow-y-auto shadow-2xl">
                <div class="p-5 border-b border-gray-100 flex justify-between items-center sticky top-0 bg-white z-10">
                    <h3 class="text-xl font-bold text-gray-800">{"New installment"}</h3>
                    <button
                        onclick={on_close}
                        class="p-2 hover:bg-gray-100 text-gray-400 hover:text-gray-600 rounded-full transition-colors"
                    >
                        { icon_close() }
                    </button>
                </div>

                <form onsubmit={on_submit} class="p-6 space-y-5">
                    <div class="grid md:grid-cols-2 gap-4">
                        <div class="space-y-1.5">
                            <label class="text-sm font-medium text-gray-700">{"Client name"}</label>
                            <input
                                type="text"
                                value={(*client_name).clone()}
                                oninput={text_input(&client_name)}
                                class="text-gray-900 w-full p-3 rounded-lg border border-gray-200 focus:border-blue-600 outline-none transition-all"
                            />
                        </div>
                        <div class="space-y-1.5">
                            <label class="text-sm font-medium text-gray-700">{"Phone number"}</label>
                            <input
                                type="tel"
                                value={(*phone_number).clone()}
                                oninput={digits_input(&phone_number)}
                                class="text-gray-900 w-full p-3 rounded-lg border border-gray-200 focus:border-blue-600 outline-none transition-all"
                            />
                        </div>
                    </div>

                    <div class="space-y-1.5">
                        <label class="text-sm font-medium text-gray-700">{"Address"}</label>
                        <input
                            type="text"
                            value={(*address).clone()}
                            oninput={text_input(&address)}
                            class="text-gray-900 w-full p-3 rounded-lg border border-gray-200 focus:border-blue-600 outline-none transition-all"
                        />
                    </div>

                    <div class="space-y-1.5">
                        <label class="text-sm font-medium text-gray-700">{"Product"}</label>
                        <input
                            type="text"
                            value={(*advice_name).clone()}
                            oninput={text_input(&advice_name)}
                            class="text-gray-900 w-full p-3 rounded-lg border border-gray-200 focus:border-blue-600 outline-none transition-all"
                        />
                    </div>

                    <div class="grid md:grid-cols-2 gap-4">
                        <div class="space-y-1.5">
                            <label class="text-sm font-medium text-gray-700">{"Total amount"}</label>
                            <input
                                type="text"
                                inputmode="decimal"
                                value={(*total_amount).clone()}
                                oninput={on_amount_input}
                                class="text-gray-900 w-full p-3 rounded-lg border border-gray-200 focus:border-blue-600 outline-none transition-all"
                            />
                        </div>
                        <div class="space-y-1.5">
                            <label class="text-sm font-medium text-gray-700">{"Number of installments"}</label>
                            <input
                                type="text"
                                inputmode="numeric"
                                value={(*installment_count).clone()}
                                oninput={digits_input(&installment_count)}
                                class="text-gray-900 w-full p-3 rounded-lg border border-gray-200 focus:border-blue-600 outline-none transition-all"
                            />
                        </div>
                    </div>

                    <div class="space-y-1.5">
                        <label class="text-sm font-medium text-gray-700">{"Receipt image"}</label>
                        <div class="relative">
                            <input
                                type="file"
                                accept="image/*"
                                onchange={on_file_change}
                                class="absolute inset-0 w-full h-full opacity-0 cursor-pointer"
                            />
                            <div class={classes!(
                                "w-full", "p-4", "rounded-lg", "border-2", "border-dashed", "transition-all", "flex", "items-center", "justify-center", "gap-2",
                                if image.is_some() { "border-green-500 bg-green-50 text-green-700" } else { "border-gray-300 hover:border-blue-600 hover:bg-blue-50 text-gray-500" }
                            )}>
                                { icon_upload() }
                                <span class="text-sm font-medium">
                                    { image.as_ref().map(|f| f.name()).unwrap_or_else(|| "Click to upload an image".to_string()) }
                                </span>
                            </div>
                        </div>
                    </div>

                    if let Some(msg) = *form_error {
                        <p class="text-sm text-red-500">{ msg }</p>
                    }

                    <button
                        type="submit"
                        disabled={*saving}
                        class="w-full bg-blue-600 text-white py-3.5 rounded-xl font-bold hover:bg-blue-700 transition-all disabled:opacity-70 disabled:cursor-not-allowed mt-2"
                    >
                        { if *saving { "Saving..." } else { "Save installment" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: &'static str,
    value: String,
    icon: StatIcon,
    color: &'static str,
    bg: &'static str,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="p-6 bg-white rounded-2xl shadow-sm border border-gray-100 hover:shadow-md transition-all">
            <div class="flex items-center justify-between">
                <div>
                    <p class="text-gray-500 text-sm font-medium mb-2">{ props.title }</p>
                    <h3 class={classes!("text-2xl", "font-bold", props.color)}>{ props.value.clone() }</h3>
                </div>
                <div class={classes!("p-4", "rounded-2xl", props.bg, props.color)}>
                    {
                        match props.icon {
                            StatIcon::Users => icon_users(),
                            StatIcon::Chart => icon_trending_up(),
                            StatIcon::Money => icon_money(),
                            StatIcon::Alert => icon_alert_circle(),
                        }
                    }
                </div>
            </div>
        </div>
    }
}

fn format_with_commas(value: i64) -> String {
    let is_negative = value < 0;
    let s = value.abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    let formatted: String = out.into_iter().rev().collect();
    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

// Amounts are displayed truncated to whole units.
fn format_amount(amount: f64) -> String {
    format_with_commas(amount as i64)
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_user() -> Html {
    icon_base("M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2M12 7m-4 0a4 4 0 108 0 4 4 0 10-8 0")
}
fn icon_users() -> Html {
    icon_base("M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2M9 7m-4 0a4 4 0 108 0 4 4 0 10-8 0M23 21v-2a4 4 0 00-3-3.87M16 3.13a4 4 0 010 7.75")
}
fn icon_lock() -> Html {
    icon_base("M3 11h18v11H3zM7 11V7a5 5 0 0110 0v4")
}
fn icon_eye() -> Html {
    icon_base("M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8zM12 12m-3 0a3 3 0 106 0 3 3 0 10-6 0")
}
fn icon_eye_off() -> Html {
    icon_base("M17.94 17.94A10.07 10.07 0 0112 20c-7 0-11-8-11-8a18.45 18.45 0 015.06-5.94M9.9 4.24A9.12 9.12 0 0112 4c7 0 11 8 11 8a18.5 18.5 0 01-2.16 3.19M1 1l22 22")
}
fn icon_money() -> Html {
    icon_base("M2 7h20v10H2zM12 12m-3 0a3 3 0 106 0 3 3 0 10-6 0")
}
fn icon_cash() -> Html {
    icon_base("M2 9h20v12H2zM6 5h14M9 1h8M12 15m-2 0a2 2 0 104 0 2 2 0 10-4 0")
}
fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
fn icon_alert_circle() -> Html {
    icon_base("M12 12m-10 0a10 10 0 1020 0 10 10 0 10-20 0M12 8v4M12 16h.01")
}
fn icon_phone() -> Html {
    icon_base("M7 2h10v20H7zM11 18h2")
}
fn icon_image() -> Html {
    icon_base("M3 5h18v14H3zM8 11l3 3 5-5 5 5")
}
fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
fn icon_close() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}
fn icon_upload() -> Html {
    icon_base("M16 16l-4-4-4 4M12 12v9M20.39 18.39A5 5 0 0018 9h-1.26A8 8 0 103 16.3")
}
fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
